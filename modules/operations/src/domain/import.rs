//! Customer register spreadsheet mapping.

use fsm_sheets::Sheet;

use super::model::Customer;

/// Accepted header names per customer field.
mod columns {
    pub const ANLEGGSNR: &[&str] = &["An.nr.", "anleggsnr", "an.nr"];
    pub const KUNDENNR: &[&str] = &["Knr", "kundennr"];
    pub const KUNDNAVN: &[&str] = &["Kunde", "kundnavn", "kundenavn"];
    pub const TYPENR: &[&str] = &["Type nr.", "typenr", "type nr"];
    pub const TYPENAVN: &[&str] = &["Type navn", "typenavn"];
    pub const KOMMUNE: &[&str] = &["Kommune"];
    pub const ADRESSE: &[&str] = &["Adresse"];
    pub const POSTNR: &[&str] = &["Postnr", "postnummer"];
    pub const POSTSTED: &[&str] = &["Sted", "poststed"];
    pub const SERVICE_INTERVALL: &[&str] = &["Service intervall", "service_intervall"];
    pub const UKE: &[&str] = &["Uke"];
    pub const SERVICEANSVARLIG: &[&str] = &["Serviceansvarlig"];
    pub const TELEFON1: &[&str] = &["Tlf 1", "telefon1"];
    pub const TELEFON2: &[&str] = &["Tlf 2", "telefon2"];
    pub const EPOST: &[&str] = &["Epost", "e-post"];
    pub const STARTDATO: &[&str] = &["Startdato"];
    pub const STYREENHET: &[&str] = &["Styreenhet"];
    pub const KOMMENTAR: &[&str] = &["Kommentar"];
    pub const KUNDEINFO: &[&str] = &["Kundeinfo"];
}

/// Build one customer per non-empty data row. Required text fields default
/// to `""`; identifier-like columns are read as integer strings.
#[must_use]
pub fn customers_from_sheet(sheet: &Sheet) -> Vec<Customer> {
    let anleggsnr = sheet.column(columns::ANLEGGSNR);
    let kundennr = sheet.column(columns::KUNDENNR);
    let kundnavn = sheet.column(columns::KUNDNAVN);
    let typenr = sheet.column(columns::TYPENR);
    let typenavn = sheet.column(columns::TYPENAVN);
    let kommune = sheet.column(columns::KOMMUNE);
    let adresse = sheet.column(columns::ADRESSE);
    let postnr = sheet.column(columns::POSTNR);
    let poststed = sheet.column(columns::POSTSTED);
    let service_intervall = sheet.column(columns::SERVICE_INTERVALL);
    let uke = sheet.column(columns::UKE);
    let serviceansvarlig = sheet.column(columns::SERVICEANSVARLIG);
    let telefon1 = sheet.column(columns::TELEFON1);
    let telefon2 = sheet.column(columns::TELEFON2);
    let epost = sheet.column(columns::EPOST);
    let startdato = sheet.column(columns::STARTDATO);
    let styreenhet = sheet.column(columns::STYREENHET);
    let kommentar = sheet.column(columns::KOMMENTAR);
    let kundeinfo = sheet.column(columns::KUNDEINFO);

    sheet
        .rows()
        .map(|row| Customer {
            anleggsnr: row.int_text(anleggsnr).unwrap_or_default(),
            kundennr: row.int_text(kundennr).unwrap_or_default(),
            kundnavn: row.text(kundnavn).unwrap_or_default(),
            typenr: row.int_text(typenr),
            typenavn: row.text(typenavn),
            kommune: row.text(kommune).unwrap_or_default(),
            adresse: row.text(adresse).unwrap_or_default(),
            postnr: row.int_text(postnr).unwrap_or_default(),
            poststed: row.text(poststed).unwrap_or_default(),
            service_intervall: row.int_text(service_intervall),
            uke: row.int_text(uke),
            serviceansvarlig: row.text(serviceansvarlig),
            telefon1: row.int_text(telefon1),
            telefon2: row.int_text(telefon2),
            epost: row.text(epost),
            startdato: row.text(startdato),
            styreenhet: row.text(styreenhet),
            kommentar: row.text(kommentar),
            kundeinfo: row.text(kundeinfo),
            tjeneste_nr: None,
        })
        .collect()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use fsm_sheets::fixture::{XlsxValue as V, build_xlsx};
    use fsm_sheets::read_first_sheet_blocking;

    #[test]
    fn maps_register_columns() {
        let bytes = build_xlsx(&[
            vec![
                V::text("An.nr."),
                V::text("Knr"),
                V::text("Kunde"),
                V::text("Type nr."),
                V::text("Kommune"),
                V::text("Adresse"),
                V::text("Postnr"),
                V::text("Sted"),
                V::text("Tlf 1"),
                V::text("Kommentar"),
            ],
            vec![
                V::num(63798.0),
                V::num(1001.0),
                V::text("Hansen Gaard"),
                V::num(12.0),
                V::text("Oslo"),
                V::text("Storgata 1"),
                V::text("0150"),
                V::text("Oslo"),
                V::num(91_234_567.0),
                V::text("NaN"),
            ],
            vec![
                V::num(63856.0),
                V::Blank,
                V::text("Berg"),
                V::Blank,
                V::text("Bergen"),
                V::Blank,
                V::num(5003.0),
                V::text("Bergen"),
                V::Blank,
                V::text(" ring first "),
            ],
        ]);
        let sheet = read_first_sheet_blocking(&bytes).unwrap();
        let customers = customers_from_sheet(&sheet);

        assert_eq!(customers.len(), 2);
        let first = &customers[0];
        assert_eq!(first.anleggsnr, "63798");
        assert_eq!(first.kundennr, "1001");
        assert_eq!(first.typenr.as_deref(), Some("12"));
        assert_eq!(first.postnr, "0150");
        assert_eq!(first.telefon1.as_deref(), Some("91234567"));
        assert_eq!(first.kommentar, None);
        assert_eq!(first.tjeneste_nr, None);

        let second = &customers[1];
        assert_eq!(second.kundennr, "");
        assert_eq!(second.adresse, "");
        assert_eq!(second.postnr, "5003");
        assert_eq!(second.typenr, None);
        assert_eq!(second.kommentar.as_deref(), Some("ring first"));
    }

    #[test]
    fn headers_only_yields_nothing() {
        let bytes = build_xlsx(&[vec![V::text("An.nr."), V::text("Kunde")]]);
        let sheet = read_first_sheet_blocking(&bytes).unwrap();
        assert!(customers_from_sheet(&sheet).is_empty());
    }
}
