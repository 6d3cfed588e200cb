use boleto_core::{Bank, BarcodeParts, Boleto, BoletoError, Document, codec_for, parse_free_field};
use pretty_assertions::assert_eq;

fn from_json(json: &str) -> Document {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_bs2_document_from_json() {
    let doc = from_json(
        r#"{
            "banco": "218",
            "data_vencimento": "2024-05-10",
            "valor": "150.75",
            "agencia": "0001",
            "conta": "1234567",
            "carteira": "11",
            "numero": "123"
        }"#,
    );
    let boleto = Boleto::new(doc);

    assert_eq!(boleto.barcode().unwrap(), "21893971200000150750010001234567000000001238");
    assert_eq!(
        boleto.digitable_line().unwrap(),
        "21890.01007 01234.567004 00000.012385 3 97120000015075"
    );
}

#[test]
fn test_sisprime_document_from_json() {
    let doc = from_json(
        r#"{
            "bank": "sisprime",
            "due_date": "2024-05-10",
            "amount": "150.75",
            "agency": "0001",
            "account": "12345",
            "account_dv": "6",
            "wallet": "009",
            "number": "123"
        }"#,
    );
    let boleto = Boleto::new(doc);

    assert_eq!(boleto.barcode().unwrap(), "08491971200000150750001000012345600000001238");
    assert_eq!(boleto.own_number_for_display().unwrap(), "009/0000000123-8");
}

#[test]
fn test_efi_without_agreement_names_the_field() {
    let doc = from_json(
        r#"{
            "bank": "364",
            "due_date": "2024-05-10",
            "amount": "150.75",
            "agency": "3069",
            "account": "12345",
            "wallet": "01",
            "number": "4567"
        }"#,
    );
    let boleto = Boleto::new(doc);

    let err = boleto.barcode().unwrap_err();
    assert_eq!(err.to_string(), "required fields missing: agreement");
}

#[test]
fn test_barcode_decomposes_back_to_free_field() {
    let barcode = "36496000000000150751306901123456700045675001";
    let parts = BarcodeParts::parse(barcode).unwrap();

    assert_eq!(parts.verify().unwrap(), Bank::Efi);
    let parsed = parse_free_field(&parts.bank_code, &parts.free_field).unwrap();
    assert_eq!(parsed.agency.as_deref(), Some("3069"));
    assert_eq!(parsed.own_number_full.as_deref(), Some("00045675"));
}

#[test]
fn test_unsupported_bank() {
    assert!(matches!(codec_for("001"), Err(BoletoError::UnsupportedBank(_))));
    assert!(serde_json::from_str::<Document>(r#"{"bank": "237"}"#).is_err());
}
