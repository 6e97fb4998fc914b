use super::*;

fn blush() -> Product {
    Product {
        id: ProductId(1_700_000_000_000),
        name: "Blush".to_string(),
        image: "http://x/img.png".to_string(),
        price: "49.90".to_string(),
        prioridade: Priority::Alta,
        description: String::new(),
        comprado: false,
    }
}

#[test]
fn product_serializes_with_persisted_field_names() {
    let value = serde_json::to_value(blush()).expect("serialize");
    let object = value.as_object().expect("object");

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["comprado", "description", "id", "image", "name", "prioridade", "price"]
    );
    assert_eq!(object["id"], serde_json::json!(1_700_000_000_000_i64));
    assert_eq!(object["prioridade"], serde_json::json!("Alta"));
    assert_eq!(object["comprado"], serde_json::json!(false));
}

#[test]
fn media_priority_keeps_accented_label() {
    let encoded = serde_json::to_string(&Priority::Media).expect("serialize");
    assert_eq!(encoded, "\"Média\"");

    let decoded: Priority = serde_json::from_str("\"Média\"").expect("deserialize");
    assert_eq!(decoded, Priority::Media);
}

#[test]
fn reads_browser_written_record_with_missing_optional_fields() {
    let raw = r#"{"id":1712345678901,"name":"Batom","image":"http://x/b.png","price":"19.5"}"#;
    let product: Product = serde_json::from_str(raw).expect("deserialize");

    assert_eq!(product.id, ProductId(1_712_345_678_901));
    assert_eq!(product.prioridade, Priority::Baixa);
    assert_eq!(product.description, "");
    assert!(!product.comprado);
}

#[test]
fn priority_parses_user_input_loosely() {
    assert_eq!("alta".parse::<Priority>().expect("alta"), Priority::Alta);
    assert_eq!("MÉDIA".parse::<Priority>().expect("média"), Priority::Media);
    assert_eq!("Media".parse::<Priority>().expect("media"), Priority::Media);
    assert_eq!(" Baixa ".parse::<Priority>().expect("baixa"), Priority::Baixa);
    assert!("urgent".parse::<Priority>().is_err());
}

#[test]
fn draft_defaults_to_low_priority() {
    let draft = ProductDraft::default();
    assert_eq!(draft.prioridade, Priority::Baixa);
    assert!(draft.name.is_empty());
}

#[test]
fn draft_validation_reports_first_missing_field() {
    let missing_name = ProductDraft::new("", "http://x", "1", Priority::Baixa, "");
    assert_eq!(
        missing_name.validate(),
        Err(ValidationError::MissingField(RequiredField::Name))
    );

    let missing_image = ProductDraft::new("Blush", "", "1", Priority::Baixa, "");
    assert_eq!(
        missing_image.validate().map_err(|e| e.field()),
        Err(RequiredField::Image)
    );

    let missing_price = ProductDraft::new("Blush", "http://x", "", Priority::Baixa, "");
    assert_eq!(
        missing_price.validate().map_err(|e| e.field()),
        Err(RequiredField::Price)
    );
}

#[test]
fn draft_accepts_whitespace_and_empty_description() {
    let draft = ProductDraft::new(" ", "http://x", "0", Priority::Alta, "");
    assert!(draft.validate().is_ok());
}

#[test]
fn display_price_uses_two_decimals() {
    let mut product = blush();
    assert_eq!(product.display_price(), "R$ 49.90");

    product.price = "7".to_string();
    assert_eq!(product.display_price(), "R$ 7.00");

    product.price = "abc".to_string();
    assert_eq!(product.price_value(), None);
    assert_eq!(product.display_price(), "R$ NaN");
}

#[test]
fn display_price_reads_leading_number_like_a_browser() {
    let cases = [
        ("49,90", "R$ 49.00"),
        ("10 reais", "R$ 10.00"),
        ("  12.3456abc", "R$ 12.35"),
        (".5", "R$ 0.50"),
        ("-3.5e1x", "R$ -35.00"),
        ("2e", "R$ 2.00"),
        ("1.e2", "R$ 100.00"),
        ("-0", "R$ 0.00"),
        ("inf", "R$ NaN"),
        ("nan", "R$ NaN"),
        (".", "R$ NaN"),
        ("-", "R$ NaN"),
        ("R$ 10", "R$ NaN"),
        ("Infinity", "R$ Infinity"),
        ("-Infinity!", "R$ -Infinity"),
    ];

    let mut product = blush();
    for (price, shown) in cases {
        product.price = price.to_string();
        assert_eq!(product.display_price(), shown, "price {price:?}");
    }
}

#[test]
fn price_value_is_none_only_without_a_leading_number() {
    let mut product = blush();
    product.price = "49,90".to_string();
    assert_eq!(product.price_value(), Some(49.0));

    product.price = "R$ 49".to_string();
    assert_eq!(product.price_value(), None);
}

#[test]
fn duplicate_ids_are_reported_once_each() {
    let mut second = blush();
    second.id = ProductId(2);
    let products = [blush(), second.clone(), blush(), blush(), second];

    assert_eq!(
        duplicate_ids(&products),
        vec![ProductId(1_700_000_000_000), ProductId(2)]
    );
    assert!(duplicate_ids(&[blush()]).is_empty());
}

#[test]
fn toggled_flips_only_purchased_flag() {
    let product = blush();
    let toggled = product.toggled();

    assert!(toggled.comprado);
    assert_eq!(toggled.toggled(), product);
}

#[test]
fn progress_of_empty_collection_is_zero() {
    let progress = Progress::of(&[]);
    assert_eq!(progress.total, 0);
    assert_eq!(progress.purchased, 0);
    assert_eq!(progress.percent, 0.0);
    assert_eq!(progress.label(), "Comprados: 0 de 0");
}

#[test]
fn progress_counts_purchased_share() {
    let mut bought = blush();
    bought.comprado = true;
    let mut other = blush();
    other.id = ProductId(2);

    let progress = Progress::of(&[bought, other]);
    assert_eq!(progress.total, 2);
    assert_eq!(progress.purchased, 1);
    assert_eq!(progress.percent, 50.0);
}
