use marketplace_api::{
    dto::{
        auth::RegisterRequest,
        categories::CategoryRequest,
        customers::UpdateCustomerRequest,
        products::ProductRequest,
    },
    slug::{resolve_slug, slugify},
    validation::{FieldError, Validate, check_password},
};

fn register(password: &str) -> RegisterRequest {
    RegisterRequest {
        name: "Toko Maju".into(),
        email: "maju@example.com".into(),
        phone: "081234567890".into(),
        password: password.into(),
        role: "seller".into(),
    }
}

fn messages(errors: &[FieldError]) -> Vec<&str> {
    errors.iter().map(|e| e.error_message.as_str()).collect()
}

#[test]
fn complete_registration_passes() {
    let payload = register("Abcdef1!");
    assert!(check_password(&payload.password, payload.validate()).is_empty());
}

#[test]
fn password_without_uppercase_reports_only_that() {
    let payload = register("abcdefgh");
    let errors = check_password(&payload.password, payload.validate());
    assert_eq!(
        messages(&errors),
        vec!["password must contain at least one uppercase letter"]
    );
}

#[test]
fn password_policy_checks_classes_in_order() {
    let cases = [
        ("Abc def1!", "password must contain no space"),
        ("Abcdefgh!", "password must contain at least one digit number"),
        ("Abcdefg1", "password must contain at least one special letter"),
    ];
    for (password, expected) in cases {
        let errors = check_password(password, Vec::new());
        assert_eq!(messages(&errors), vec![expected], "password {password:?}");
    }
}

#[test]
fn password_policy_is_skipped_after_a_length_error() {
    let payload = register("abc");
    let errors = check_password(&payload.password, payload.validate());
    assert_eq!(messages(&errors), vec!["password must contain min=8"]);
}

#[test]
fn empty_registration_reports_each_field_once() {
    let errors = RegisterRequest::default().validate();
    assert_eq!(
        messages(&errors),
        vec![
            "name must contain required",
            "email must contain required",
            "phone must contain required",
            "password must contain required",
            "role must contain oneof=seller customer",
        ]
    );
}

#[test]
fn registration_field_rules() {
    let payload = RegisterRequest {
        name: "x".repeat(51),
        email: "not-an-email".into(),
        phone: "08-123".into(),
        password: "Abcdef1!".into(),
        role: "admin".into(),
    };
    let errors = payload.validate();
    assert_eq!(
        messages(&errors),
        vec![
            "name must contain max=50",
            "email must contain email",
            "phone must contain numeric",
            "role must contain oneof=seller customer",
        ]
    );
}

#[test]
fn customer_gender_must_be_known() {
    let payload = UpdateCustomerRequest {
        name: "Budi".into(),
        email: "budi@example.com".into(),
        image: "/uploads/a.png".into(),
        phone: "0812".into(),
        gender: "other".into(),
        date_of_birth: "1990-01-31".into(),
    };
    let errors = payload.validate();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "gender");
    assert_eq!(errors[0].error_message, "gender must contain oneof=male female");
}

#[test]
fn product_rules_bound_price_stock_and_rating() {
    let payload = ProductRequest {
        name: "Mouse".into(),
        price: 0.0,
        stock: -1,
        rating: 6,
        category_id: 1,
        seller_id: 1,
        ..Default::default()
    };
    let fields: Vec<_> = payload.validate().into_iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["price", "stock", "rating"]);
}

#[test]
fn category_name_is_required() {
    let errors = CategoryRequest::default().validate();
    assert_eq!(messages(&errors), vec!["name must contain required"]);
}

#[test]
fn slugify_lowercases_and_drops_spaces() {
    assert_eq!(slugify("Men's Wear"), "men'swear");
    assert_eq!(slugify("  Home  Garden "), "homegarden");
    let once = slugify("Sports And Outdoor");
    assert_eq!(slugify(&once), once);
}

#[test]
fn submitted_slug_never_overrides_the_derived_one() {
    assert_eq!(resolve_slug("Men's Wear", None), "men'swear");
    assert_eq!(resolve_slug("Men's Wear", Some("")), "men'swear");
    assert_eq!(resolve_slug("Men's Wear", Some("mens-wear")), "men'swear");
    assert_eq!(resolve_slug("Men's Wear", Some("men'swear")), "men'swear");
}
