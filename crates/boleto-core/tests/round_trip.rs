use boleto_core::{
    Bank, BarcodeParts, Boleto, Document, Modulo11, StandardEngine, WeightCycle, Remainder,
    check_digit::modulo11, format::FACTOR_BASE_DATE, format_fixed_width,
};
use chrono::Duration;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn base(bank: Bank, days: i64, cents: i64) -> Document {
    Document::new(bank)
        .with_due_date(FACTOR_BASE_DATE + Duration::days(days))
        .with_amount(Decimal::new(cents, 2))
}

fn assert_widths(boleto: &Boleto) -> Result<(), TestCaseError> {
    let free_field = boleto.free_field().expect("free field");
    let barcode = boleto.barcode().expect("barcode");
    prop_assert_eq!(free_field.len(), 25);
    prop_assert_eq!(barcode.len(), 44);
    prop_assert!(barcode.bytes().all(|b| b.is_ascii_digit()));
    prop_assert_eq!(&barcode[19..], free_field);

    let parts = BarcodeParts::parse(barcode).expect("parse");
    prop_assert_eq!(parts.verify().expect("verify"), boleto.document().bank);
    Ok(())
}

proptest! {
    #[test]
    fn bs2_free_field_round_trip(
        account in 0u64..=9_999_999_999,
        number in 0u64..=9_999_999_999,
        days in 0i64..=30_000,
        cents in 0i64..=9_999_999_999,
    ) {
        let doc = base(Bank::Bs2, days, cents)
            .with_agency("0001")
            .with_account(account.to_string(), None)
            .with_wallet("11")
            .with_number(number);
        let boleto = Boleto::new(doc);

        let parsed = boleto.parse_free_field(boleto.free_field().expect("free field")).expect("parse");
        prop_assert_eq!(parsed.account, Some(format_fixed_width(account, 10).expect("width")));
        prop_assert_eq!(parsed.own_number, Some(format_fixed_width(number, 11).expect("width")));
        prop_assert_eq!(parsed.own_number_dv, None);
        assert_widths(&boleto)?;
    }
}

proptest! {
    #[test]
    fn efi_free_field_round_trip(
        agency in 0u32..=9_999,
        agreement in 0u32..=9_999_999,
        number in 0u32..=9_999_999,
        installment in 0u16..=999,
        cents in 0i64..=9_999_999_999,
    ) {
        let doc = base(Bank::Efi, 0, cents)
            .with_agency(agency.to_string())
            .with_account("1", None)
            .with_wallet("01")
            .with_agreement(agreement.to_string())
            .with_number(number)
            .with_installment(installment);
        let boleto = Boleto::new(doc);

        let parsed = boleto.parse_free_field(boleto.free_field().expect("free field")).expect("parse");
        prop_assert_eq!(parsed.agency, Some(format_fixed_width(agency, 4).expect("width")));
        prop_assert_eq!(parsed.agreement, Some(format_fixed_width(agreement, 7).expect("width")));
        prop_assert_eq!(parsed.own_number, Some(format_fixed_width(number, 7).expect("width")));
        prop_assert_eq!(parsed.installment, Some(format_fixed_width(installment, 3).expect("width")));
        assert_widths(&boleto)?;
    }
}

proptest! {
    #[test]
    fn sisprime_free_field_round_trip(
        agency in 0u32..=9_999,
        account in 0u32..=99_999,
        account_dv in 0u8..=9,
        number in 0u64..=9_999_999_999,
        days in 0i64..=30_000,
    ) {
        let dv = account_dv.to_string();
        let doc = base(Bank::Sisprime, days, 100)
            .with_agency(agency.to_string())
            .with_account(account.to_string(), Some(dv.as_str()))
            .with_wallet("009")
            .with_number(number);
        let boleto = Boleto::new(doc);

        let parsed = boleto.parse_free_field(boleto.free_field().expect("free field")).expect("parse");
        prop_assert_eq!(parsed.agency, Some(format_fixed_width(agency, 4).expect("width")));
        prop_assert_eq!(
            parsed.account,
            Some(format_fixed_width(format!("{account}{dv}"), 10).expect("width"))
        );
        prop_assert_eq!(parsed.own_number, Some(format_fixed_width(number, 10).expect("width")));
        assert_widths(&boleto)?;
    }
}

proptest! {
    #[test]
    fn modulo11_is_deterministic_and_a_digit(
        digits in "[0-9]{1,60}",
        start in 2u32..=4,
        max in 5u32..=9,
        reset in 1u32..=2,
        ten_override in 0u32..=9,
    ) {
        let params = Modulo11::new(
            WeightCycle::new(start, max, reset),
            Remainder::Mapped { ten_override },
        );
        let first = modulo11(&digits, params).expect("digits");
        prop_assert_eq!(modulo11(&digits, params).expect("digits"), first);
        prop_assert!((1..=9).contains(&first));

        let raw = modulo11(&digits, Modulo11::new(params.weights, Remainder::Raw)).expect("digits");
        prop_assert!(raw <= 10);
    }

    #[test]
    fn barcode_is_deterministic_across_instances(
        number in 0u64..=9_999_999_999,
        days in 0i64..=30_000,
    ) {
        let doc = base(Bank::Bs2, days, 15075)
            .with_agency("0001")
            .with_account("1234567", None)
            .with_wallet("21")
            .with_number(number);

        let first = Boleto::with_engine(doc.clone(), std::sync::Arc::new(StandardEngine));
        let second = Boleto::new(doc);
        prop_assert_eq!(first.barcode().expect("barcode"), second.barcode().expect("barcode"));
    }
}
