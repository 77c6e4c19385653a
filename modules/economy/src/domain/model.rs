use fsm_db::Document;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub employee_id: Uuid,
    /// `lonn`, `bonus`, `pensjon`, `feriepenger`, ...
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub date: String,
}

impl Document for Payout {
    const COLLECTION: &'static str = "payouts";
    const LABEL: &'static str = "Payout";
}

/// A price list entry. `tjenestenr` is matched against a customer's
/// `typenr` (or `tjeneste_nr`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub tjenestenr: String,
    pub tjeneste_navn: String,
    #[serde(default)]
    pub beskrivelse: Option<String>,
    #[serde(default)]
    pub leverandor: Option<String>,
    /// Supplier whose rates apply to this service.
    #[serde(default)]
    pub produsent_id: Option<Uuid>,
    /// Fixed price, not hourly.
    #[serde(default)]
    pub pris: f64,
    #[serde(default)]
    pub t1_ekstraservice: f64,
    #[serde(default)]
    pub t2_ekstraservice_50: f64,
    #[serde(default)]
    pub t3_ekstraservice_100: f64,
    #[serde(default)]
    pub t4_ekstraarbeid: f64,
    #[serde(default)]
    pub t5_kjoretid: f64,
    /// Per km.
    #[serde(default)]
    pub t6_km_godtgjorelse: f64,
}

impl Document for Service {
    const COLLECTION: &'static str = "services";
    const LABEL: &'static str = "Service";
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierPricing {
    pub name: String,
    #[serde(default)]
    pub arbeidstid_rate: f64,
    #[serde(default)]
    pub kjoretid_rate: f64,
    #[serde(default)]
    pub km_rate: f64,
    /// Server-maintained; any client value is overwritten on write.
    #[serde(with = "time::serde::rfc3339", default = "now")]
    pub updated_at: OffsetDateTime,
}

impl Document for SupplierPricing {
    const COLLECTION: &'static str = "supplier_pricing";
    const LABEL: &'static str = "Supplier pricing";
}

impl SupplierPricing {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        arbeidstid_rate: f64,
        kjoretid_rate: f64,
        km_rate: f64,
    ) -> Self {
        Self {
            name: name.into(),
            arbeidstid_rate,
            kjoretid_rate,
            km_rate,
            updated_at: now(),
        }
    }

    #[must_use]
    pub fn touched(self) -> Self {
        Self {
            updated_at: now(),
            ..self
        }
    }
}
