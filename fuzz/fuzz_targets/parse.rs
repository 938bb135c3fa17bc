#![no_main]

use libfuzzer_sys::fuzz_target;
use repogen::frontend::tokenizer;
use repogen::model::{FieldDescriptor, MethodModel, SourceModel, StructModel, TypeDescriptor};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(name) = std::str::from_utf8(data) {
        // Tokenizing is total and loses nothing
        let tokens = tokenizer::tokenize(name);
        assert_eq!(tokens.concat(), name);

        let model = SourceModel {
            package: "fuzz".into(),
            structs: vec![StructModel {
                name: "Entity".into(),
                fields: vec![
                    FieldDescriptor::new("ID", TypeDescriptor::simple("string"), Some(r#"bson:"_id""#)),
                    FieldDescriptor::new("Age", TypeDescriptor::simple("int"), Some(r#"bson:"age""#)),
                ],
            }],
            ..Default::default()
        };
        let method = MethodModel {
            name: name.to_string(),
            params: vec![TypeDescriptor::context(), TypeDescriptor::simple("int")],
            returns: vec![
                TypeDescriptor::sequence(TypeDescriptor::pointer(TypeDescriptor::simple("Entity"))),
                TypeDescriptor::error(),
            ],
        };
        // Parsing must fail with a typed error, never panic
        let _ = repogen::parse_method(&model, &model.structs[0], &method);
    }
});
