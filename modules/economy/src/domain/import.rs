//! Service price list spreadsheet mapping.

use fsm_sheets::Sheet;

use super::model::Service;

mod columns {
    pub const TJENESTENR: &[&str] = &["tjenestenr", "tjeneste nr", "service nr"];
    pub const NAVN: &[&str] = &["tjeneste navn", "navn"];
    pub const PRIS: &[&str] = &["leverand\u{f8}r pris", "pris"];
    pub const BESKRIVELSE: &[&str] = &["beskrivelse"];
    pub const LEVERANDOR: &[&str] = &["leverand\u{f8}r", "leverandor"];
    pub const T1: &[&str] = &["t1", "t1_ekstraservice"];
    pub const T2: &[&str] = &["t2", "t2_ekstraservice_50"];
    pub const T3: &[&str] = &["t3", "t3_ekstraservice_100"];
    pub const T4: &[&str] = &["t4", "t4_ekstraarbeid"];
    pub const T5: &[&str] = &["t5", "t5_kjoretid"];
    pub const T6: &[&str] = &["t6", "t6_km_godtgjorelse"];
}

/// One service per non-empty data row; missing or non-numeric prices read
/// as `0.0`.
#[must_use]
pub fn services_from_sheet(sheet: &Sheet) -> Vec<Service> {
    let tjenestenr = sheet.column(columns::TJENESTENR);
    let navn = sheet.column(columns::NAVN);
    let pris = sheet.column(columns::PRIS);
    let beskrivelse = sheet.column(columns::BESKRIVELSE);
    let leverandor = sheet.column(columns::LEVERANDOR);
    let rates = [
        columns::T1,
        columns::T2,
        columns::T3,
        columns::T4,
        columns::T5,
        columns::T6,
    ]
    .map(|names| sheet.column(names));

    sheet
        .rows()
        .map(|row| {
            let [t1, t2, t3, t4, t5, t6] = rates.map(|col| row.number(col).unwrap_or_default());
            Service {
                tjenestenr: row.int_text(tjenestenr).unwrap_or_default(),
                tjeneste_navn: row.text(navn).unwrap_or_default(),
                beskrivelse: row.text(beskrivelse),
                leverandor: row.text(leverandor),
                produsent_id: None,
                pris: row.number(pris).unwrap_or_default(),
                t1_ekstraservice: t1,
                t2_ekstraservice_50: t2,
                t3_ekstraservice_100: t3,
                t4_ekstraarbeid: t4,
                t5_kjoretid: t5,
                t6_km_godtgjorelse: t6,
            }
        })
        .collect()
}
