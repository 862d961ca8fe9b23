use std::path::PathBuf;

use protoshape::codegen::message::{emit_class, emit_interface};
use protoshape::codegen::writer::{CodeWriter, IndentStyle};
use protoshape::ir::{FieldRule, FieldType, Scalar, Schema, SchemaEnum, SchemaField, SchemaMessage};
use protoshape::{generate, Compiler, CompilerConfig, CompilerError, GenerationOptions};

const ADDRESS_BOOK: &str = r#"{
  "package": "example.address_book",
  "enums": [
    { "name": "phone_type", "values": [
      { "name": "Mobile", "value": 0 },
      { "name": "Home", "value": 1 },
      { "name": "Work", "value": 1, "comment": "Alias of Home" }
    ] }
  ],
  "messages": [
    {
      "name": "person",
      "comment": "A person in the address book.",
      "options": { "preserve_unknown": true },
      "fields": [
        { "id": 1, "name": "name", "type": "string", "rule": "required" },
        { "id": 2, "name": "id", "type": "int32" },
        { "id": 3, "name": "phones", "type": "phone_number", "rule": "repeated" },
        { "id": 4, "name": "home", "type": "location" },
        { "id": 5, "name": "cache", "type": "bytes", "options": { "external": true } }
      ],
      "messages": [
        {
          "name": "phone_number",
          "fields": [
            { "id": 1, "name": "number", "type": "string" },
            { "id": 2, "name": "type", "type": "phone_type" }
          ]
        },
        {
          "name": "location",
          "options": { "type": "struct" },
          "fields": [
            { "id": 1, "name": "lat", "type": "double" },
            { "id": 2, "name": "lon", "type": "double" }
          ]
        }
      ]
    },
    {
      "name": "legacy_record",
      "options": { "external": true },
      "fields": [{ "id": 1, "name": "blob", "type": "bytes" }]
    }
  ]
}"#;

fn interfaces() -> GenerationOptions {
    GenerationOptions {
        generate_interfaces: true,
        ..GenerationOptions::default()
    }
}

fn class_text(message: &SchemaMessage, options: &GenerationOptions) -> String {
    let mut cw = CodeWriter::new(IndentStyle::Spaces);
    emit_class(message, &mut cw, options);
    cw.finish()
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

fn write_schema(dir: &tempfile::TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, source).unwrap();
    path
}

#[test]
fn singular_scalar_field_has_no_interface_accessor() {
    let message = SchemaMessage::new("Person")
        .with_field(SchemaField::new(1, "Name", FieldType::Scalar(Scalar::String)));

    let text = class_text(&message, &interfaces());
    assert_eq!(count(&text, "public string Name { get; set; }"), 1);
    assert_eq!(count(&text, "{ get {"), 0);
}

#[test]
fn repeated_field_has_snapshot_view() {
    let mut tags = SchemaField::new(1, "Tags", FieldType::Scalar(Scalar::String));
    tags.rule = FieldRule::Repeated;
    tags.interface_name = "TagsView".to_string();
    let message = SchemaMessage::new("Person").with_field(tags);

    let text = class_text(&message, &interfaces());
    assert_eq!(count(&text, "public List<string> Tags { get; set; }"), 1);
    assert_eq!(
        count(&text, "public IEnumerable<string> TagsView { get { return Tags.ToArray(); } }"),
        1
    );
}

#[test]
fn external_message_is_two_comment_lines() {
    let mut message = SchemaMessage::new("Legacy")
        .with_field(SchemaField::new(1, "Blob", FieldType::Scalar(Scalar::Bytes)))
        .with_enum(SchemaEnum::new("Kind").with_member("A", 0));
    message.options.external = true;

    let text = class_text(&message, &interfaces());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, ["// Written elsewhere", "// public class Legacy {}"]);

    let mut cw = CodeWriter::new(IndentStyle::Spaces);
    emit_interface(&message, &mut cw);
    assert_eq!(cw.finish(), text);
}

#[test]
fn preserved_fields_follow_declared_fields() {
    let mut message = SchemaMessage::new("Person")
        .with_field(SchemaField::new(1, "Name", FieldType::Scalar(Scalar::String)))
        .with_field(SchemaField::new(2, "Age", FieldType::Scalar(Scalar::UInt32)));
    message.options.preserve_unknown = true;

    let text = class_text(&message, &GenerationOptions::default());
    assert_eq!(count(&text, "PreservedFields"), 1);
    assert_eq!(count(&text, "/// Values for unknown fields."), 1);

    let age = text.find("public uint Age").unwrap();
    let preserved = text.find("PreservedFields").unwrap();
    assert!(age < preserved);
}

#[test]
fn address_book_members() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_schema(&dir, "address_book.json", ADDRESS_BOOK);

    let compiler = Compiler::new(CompilerConfig {
        inputs: vec![input],
        options: interfaces(),
        ..CompilerConfig::default()
    });
    let schemas = compiler.load().unwrap();
    let output = generate(&schemas, &compiler.config().options).unwrap();

    // Scalars share one member between both views.
    assert_eq!(count(&output, "public string Name { get; set; }"), 1);
    assert_eq!(count(&output, "public int Id { get; set; }"), 1);
    assert_eq!(count(&output, "        string Name { get; }"), 1);

    // Repeated message field: list + array snapshot, interface sees IEnumerable.
    assert_eq!(
        count(&output, "public List<Example.AddressBook.Person.PhoneNumber> Phones { get; set; }"),
        1
    );
    assert_eq!(
        count(
            &output,
            "public IEnumerable<Example.AddressBook.IPhoneNumber> PhonesView { get { return Phones.ToArray(); } }"
        ),
        1
    );
    assert_eq!(
        count(&output, "IEnumerable<Example.AddressBook.IPhoneNumber> PhonesView { get; }"),
        1
    );

    // Struct message field is an inline member with a forwarding view.
    assert_eq!(count(&output, "public Example.AddressBook.Person.Location Home;"), 1);
    assert_eq!(
        count(&output, "public Example.AddressBook.ILocation HomeView { get { return Home; } }"),
        1
    );

    // External field is documented in both views, never live.
    assert_eq!(
        count(&output, "//public byte[] Cache { get; set; } // Implemented by user elsewhere"),
        1
    );
    assert_eq!(
        count(&output, "//byte[] Cache { get; } // Implemented by user elsewhere"),
        1
    );
    assert_eq!(count(&output, "\n        public byte[] Cache"), 0);

    // External message is a stub in both passes.
    assert_eq!(count(&output, "// public class LegacyRecord {}"), 2);
    assert_eq!(count(&output, "Blob"), 0);

    // Duplicate enum values are kept.
    assert_eq!(count(&output, "Home = 1,"), 1);
    assert_eq!(count(&output, "Work = 1,"), 1);
}

#[test]
fn nested_declarations_keep_order() {
    let mut outer = SchemaMessage::new("Outer");
    for name in ["Charlie", "Alpha", "Bravo"] {
        let inner = SchemaMessage::new(name)
            .with_enum(SchemaEnum::new(format!("{}Kind", name)).with_member("X", 0))
            .with_message(SchemaMessage::new(format!("{}Leaf", name)));
        outer = outer.with_message(inner);
    }
    let mut schema = Schema::new("Order");
    schema.messages.push(outer);

    let output = generate(&[schema], &interfaces()).unwrap();

    let positions: Vec<usize> = [
        "partial interface IOuter",
        "partial interface ICharlie",
        "partial interface ICharlieLeaf",
        "partial interface IAlpha",
        "partial interface IAlphaLeaf",
        "partial interface IBravo",
        "partial interface IBravoLeaf",
        "partial class Outer",
        "partial class Charlie",
        "enum CharlieKind",
        "partial class CharlieLeaf",
        "partial class Alpha",
        "enum AlphaKind",
        "partial class AlphaLeaf",
        "partial class Bravo",
        "enum BravoKind",
        "partial class BravoLeaf",
    ]
    .iter()
    .map(|needle| output.find(needle).unwrap())
    .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn compile_writes_output_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_schema(&dir, "address_book.json", ADDRESS_BOOK);
    let out_dir = dir.path().join("generated");

    let compiler = Compiler::new(CompilerConfig {
        inputs: vec![input],
        output: Some(PathBuf::from(format!("{}/", out_dir.display()))),
        options: interfaces(),
        ..CompilerConfig::default()
    });
    let result = compiler.compile().unwrap();

    let expected = out_dir.join("address_book.cs");
    assert_eq!(result.output.as_deref(), Some(expected.as_path()));
    assert_eq!(result.schemas, 1);
    assert_eq!(result.messages, 4);
    assert_eq!(result.enums, 1);

    let written = std::fs::read_to_string(&expected).unwrap();
    assert_eq!(written.len(), result.bytes);
    assert!(written.starts_with("// Classes and structures being serialized\n"));
    assert!(written.contains("namespace Example.AddressBook\n{\n"));

    // Same input, same bytes.
    compiler.compile().unwrap();
    assert_eq!(std::fs::read_to_string(&expected).unwrap(), written);
}

#[test]
fn failed_compile_writes_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let good = write_schema(&dir, "a_good.json", ADDRESS_BOOK);
    let bad = write_schema(
        &dir,
        "b_bad.json",
        r#"{ "messages": [{ "name": "broken", "fields": [{ "id": 1, "name": "x", "type": "nowhere" }] }] }"#,
    );
    let output = dir.path().join("out.cs");

    let compiler = Compiler::new(CompilerConfig {
        inputs: vec![good, bad],
        output: Some(output.clone()),
        ..CompilerConfig::default()
    });

    let err = compiler.compile().unwrap_err();
    assert!(matches!(err, CompilerError::UnknownTypeReference { ref message, .. } if message == "Broken"));
    assert!(!output.exists());
}

#[test]
fn check_loads_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    write_schema(&dir, "address_book.json", ADDRESS_BOOK);
    write_schema(&dir, "extra.json", r#"{ "package": "extra", "messages": [{ "name": "ping" }] }"#);

    let result = Compiler::new(CompilerConfig {
        inputs: vec![dir.path().to_path_buf()],
        ..CompilerConfig::default()
    })
    .check()
    .unwrap();

    assert!(result.output.is_none());
    assert_eq!(result.schemas, 2);
    assert_eq!(result.messages, 5);
}

#[test]
fn nested_messages_sharing_a_name_need_distinct_interfaces() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_schema(
        &dir,
        "items.json",
        r#"{ "package": "p", "messages": [
            { "name": "a", "messages": [{ "name": "item", "fields": [{ "id": 1, "name": "n", "type": "int32" }] }] },
            { "name": "b", "messages": [{ "name": "item", "fields": [{ "id": 1, "name": "s", "type": "string" }] }] }
        ] }"#,
    );
    let output = dir.path().join("items.cs");

    let compiler = Compiler::new(CompilerConfig {
        inputs: vec![input.clone()],
        output: Some(output.clone()),
        options: interfaces(),
        ..CompilerConfig::default()
    });
    let err = compiler.compile().unwrap_err();
    assert!(matches!(err, CompilerError::DuplicateInterface { ref interface, .. } if interface == "IItem"));
    assert!(!output.exists());

    // Classes alone are fine: each Item is nested in its own parent.
    let result = Compiler::new(CompilerConfig {
        inputs: vec![input],
        output: Some(output.clone()),
        ..CompilerConfig::default()
    })
    .compile()
    .unwrap();
    assert_eq!(result.messages, 4);
}

#[test]
fn member_names_are_unique_per_message() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_schema(
        &dir,
        "person.json",
        r#"{ "messages": [{ "name": "person", "fields": [
            { "id": 1, "name": "tags", "type": "string", "rule": "repeated" },
            { "id": 2, "name": "tags_view", "type": "string" }
        ] }] }"#,
    );

    let strict = Compiler::new(CompilerConfig {
        inputs: vec![input.clone()],
        options: interfaces(),
        ..CompilerConfig::default()
    });
    assert!(matches!(strict.check().unwrap_err(), CompilerError::NameClash { .. }));

    let fixing = Compiler::new(CompilerConfig {
        inputs: vec![input],
        options: GenerationOptions {
            fix_nameclash: true,
            ..interfaces()
        },
        ..CompilerConfig::default()
    });
    let schemas = fixing.load().unwrap();
    let output = generate(&schemas, &fixing.config().options).unwrap();
    assert_eq!(count(&output, "TagsView { get; }"), 1);
    assert_eq!(count(&output, "string TagsView_ { get; }"), 1);
    assert_eq!(count(&output, "public string TagsView_ { get; set; }"), 1);
}
