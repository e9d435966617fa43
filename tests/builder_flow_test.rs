use formwright::builder::FormBuilder;
use formwright::domain::{FieldType, FieldUpdate, FieldValue, ValidationRule};
use formwright::persistence::{FileRepository, TemplateStore};
use formwright::render::{Control, FormError, Navigation, SessionOptions, Viewer};
use formwright::validation::{PASSWORD_MESSAGE, REQUIRED_MESSAGE, SELECT_ONE_MESSAGE};
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

fn file_store(dir: &TempDir) -> TemplateStore {
    TemplateStore::open(Arc::new(FileRepository::new(dir.path().join("forms.json"))))
}

fn design_signup(builder: &mut FormBuilder) {
    let edits: Vec<Vec<FieldUpdate>> = vec![
        vec![
            FieldUpdate::Name("email".into()),
            FieldUpdate::Label("Email".into()),
            FieldUpdate::Required(true),
            FieldUpdate::Validation(ValidationRule::Email),
        ],
        vec![
            FieldUpdate::Name("password".into()),
            FieldUpdate::Required(true),
            FieldUpdate::Validation(ValidationRule::Password),
        ],
        vec![
            FieldUpdate::Name("age".into()),
            FieldUpdate::Type(FieldType::Number),
            FieldUpdate::MinLength(Some(18.0)),
            FieldUpdate::MaxLength(Some(99.0)),
        ],
        vec![
            FieldUpdate::Name("topics".into()),
            FieldUpdate::Type(FieldType::Checkbox),
            FieldUpdate::Options(vec!["rust".into(), "go".into()]),
            FieldUpdate::Required(true),
        ],
        vec![
            FieldUpdate::Name("bio".into()),
            FieldUpdate::Type(FieldType::Textarea),
            FieldUpdate::DefaultValue("Hello".into()),
        ],
    ];

    for updates in edits {
        let index = builder.add_field();
        for update in updates {
            builder.update_field(index, update).unwrap();
        }
    }
}

#[test]
fn test_design_save_reload_and_submit() {
    let dir = TempDir::new().unwrap();
    let mut builder = FormBuilder::new();
    design_signup(&mut builder);

    let id = {
        let mut store = file_store(&dir);
        builder.save(&mut store, "  Signup  ").unwrap()
    };
    assert!(builder.is_empty());

    // A fresh store reads the same document back
    let store = file_store(&dir);
    assert_eq!(store.len(), 1);
    let template = store.get(id).unwrap().clone();
    assert_eq!(template.title, "Signup");
    assert_eq!(template.fields.len(), 5);

    let mut session = Viewer::open(Some(template)).into_session().unwrap();
    let controls = session.controls();
    assert_eq!(controls.len(), 5);
    assert!(controls[3].control.is_multi());
    assert!(matches!(controls[4].control, Control::TextInput { .. }));

    // Eager validation as values change
    assert_eq!(
        session.set_value("password", "weak").unwrap().as_deref(),
        Some(PASSWORD_MESSAGE)
    );
    assert_eq!(session.set_value("password", "Str0ng!pw").unwrap(), None);
    assert_eq!(
        session.set_value("age", "12").unwrap().as_deref(),
        Some("Minimum value is 18")
    );
    session.toggle_option("topics", "rust").unwrap();
    assert_eq!(
        session.toggle_option("topics", "rust").unwrap().as_deref(),
        Some(SELECT_ONE_MESSAGE)
    );

    let errors = match session.submit() {
        Err(FormError::Invalid(errors)) => errors,
        other => panic!("expected invalid submission, got {:?}", other),
    };
    assert_eq!(errors.get("email").map(String::as_str), Some(REQUIRED_MESSAGE));
    assert_eq!(errors.get("topics").map(String::as_str), Some(SELECT_ONE_MESSAGE));
    assert!(errors.contains_key("age"));
    assert!(!errors.contains_key("password"));
    assert_eq!(session.value("password"), Some(&FieldValue::text("Str0ng!pw")));

    session.set_value("email", "someone@example.com").unwrap();
    session.set_value("age", "30").unwrap();
    session.toggle_option("topics", "rust").unwrap();
    session.toggle_option("topics", "go").unwrap();
    session.toggle_option("topics", "rust").unwrap();

    let submission = session.submit().unwrap();
    assert_eq!(submission.template_id, id);
    assert_eq!(submission.values.len(), 5);
    assert_eq!(
        submission.values["topics"],
        Some(FieldValue::Multi(vec!["go".into()]))
    );
    assert_eq!(submission.values["bio"], None);
    assert!(session.values().is_empty());
    assert!(session.errors().is_empty());
}

#[test]
fn test_saved_template_is_a_copy() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);

    let mut builder = FormBuilder::new();
    let index = builder.add_field();
    builder
        .update_field(index, FieldUpdate::Name("city".into()))
        .unwrap();
    let fields = builder.fields().to_vec();
    let id = store.add("Travel", &fields).unwrap().id;

    builder
        .update_field(index, FieldUpdate::Label("Changed".into()))
        .unwrap();
    assert_eq!(store.get(id).unwrap().fields[0].label, "Untitled");
    assert_eq!(file_store(&dir).get(id).unwrap().fields[0].label, "Untitled");
}

#[test]
fn test_prefill_defaults_seeds_values() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);
    let mut builder = FormBuilder::new();
    design_signup(&mut builder);
    let id = builder.save(&mut store, "Signup").unwrap();

    let options = SessionOptions {
        prefill_defaults: true,
    };
    let session = Viewer::open_with(store.get(id).cloned(), options)
        .into_session()
        .unwrap();
    assert_eq!(session.value("bio"), Some(&FieldValue::text("Hello")));
}

#[test]
fn test_delete_returns_to_list() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);
    let mut builder = FormBuilder::new();
    builder.add_field();
    let id = builder.save(&mut store, "Short").unwrap();

    let session = Viewer::open(store.get(id).cloned()).into_session().unwrap();
    assert_eq!(session.delete_template(&mut store), Navigation::FormsList);
    assert!(store.is_empty());
    assert!(file_store(&dir).is_empty());

    match Viewer::open(store.get(id).cloned()) {
        Viewer::Missing(state) => assert_eq!(state.recovery, Navigation::FormsList),
        Viewer::Ready(_) => panic!("deleted template should not open"),
    }
    assert!(store.get(Uuid::new_v4()).is_none());
}

#[test]
fn test_unknown_field_and_wrong_toggle() {
    let mut store = TemplateStore::open(Arc::new(
        formwright::persistence::InMemoryRepository::new(),
    ));
    let mut builder = FormBuilder::new();
    design_signup(&mut builder);
    let id = builder.save(&mut store, "Signup").unwrap();
    let mut session = Viewer::open(store.get(id).cloned()).into_session().unwrap();

    assert_eq!(
        session.set_value("nope", "x").unwrap_err(),
        FormError::UnknownField("nope".into())
    );
    assert_eq!(
        session.toggle_option("email", "x").unwrap_err(),
        FormError::NotMultiSelect("email".into())
    );
}
