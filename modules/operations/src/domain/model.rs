//! Stored entity shapes. Dates are opaque ISO-8601 strings chosen by the
//! client; the server only assigns the record envelope.

use fsm_db::Document;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A serviced site. `anleggsnr` is the external key used by routes and the
/// service pricing lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub anleggsnr: String,
    pub kundennr: String,
    pub kundnavn: String,
    #[serde(default)]
    pub typenr: Option<String>,
    #[serde(default)]
    pub typenavn: Option<String>,
    pub kommune: String,
    pub adresse: String,
    pub postnr: String,
    pub poststed: String,
    #[serde(default)]
    pub service_intervall: Option<String>,
    #[serde(default)]
    pub uke: Option<String>,
    #[serde(default)]
    pub serviceansvarlig: Option<String>,
    #[serde(default)]
    pub telefon1: Option<String>,
    #[serde(default)]
    pub telefon2: Option<String>,
    #[serde(default)]
    pub epost: Option<String>,
    #[serde(default)]
    pub startdato: Option<String>,
    #[serde(default)]
    pub styreenhet: Option<String>,
    #[serde(default)]
    pub kommentar: Option<String>,
    #[serde(default)]
    pub kundeinfo: Option<String>,
    #[serde(default)]
    pub tjeneste_nr: Option<String>,
}

impl Document for Customer {
    const COLLECTION: &'static str = "customers";
    const LABEL: &'static str = "Customer";
}

impl Customer {
    /// Case-insensitive substring match over the searchable text fields.
    #[must_use]
    pub fn matches(&self, needle_lower: &str) -> bool {
        let optional = [self.typenavn.as_deref()];
        [
            self.kundnavn.as_str(),
            &self.anleggsnr,
            &self.kundennr,
            &self.poststed,
            &self.postnr,
            &self.kommune,
            &self.adresse,
        ]
        .into_iter()
        .chain(optional.into_iter().flatten())
        .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub initialer: String,
    pub navn: String,
    #[serde(default)]
    pub epost: Option<String>,
    #[serde(default)]
    pub telefon: Option<String>,
    pub stilling: String,
    #[serde(default)]
    pub intern_sats: f64,
    #[serde(default)]
    pub faktura_sats: f64,
    #[serde(default)]
    pub pa_service_sats: f64,
    #[serde(default)]
    pub pa_montering_sats: f64,
    #[serde(default)]
    pub pa_timesats: f64,
    #[serde(default)]
    pub pa_kjoresats: f64,
    #[serde(default)]
    pub pa_km_sats: f64,
}

impl Document for Employee {
    const COLLECTION: &'static str = "employees";
    const LABEL: &'static str = "Employee";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Service,
    Ekstra,
    Montering,
}

impl OrderType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Ekstra => "ekstra",
            Self::Montering => "montering",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "planlagt")]
    Planlagt,
    #[serde(rename = "fullf\u{f8}rt")]
    Fullfort,
    #[serde(rename = "avbrutt")]
    Avbrutt,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub customer_id: Uuid,
    pub employee_id: Uuid,
    pub date: String,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub arbeidstid: f64,
    #[serde(default)]
    pub kjoretid: f64,
    #[serde(default)]
    pub kjorte_km: f64,
}

impl Document for WorkOrder {
    const COLLECTION: &'static str = "workorders";
    const LABEL: &'static str = "Work order";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Kontor,
    Ekstra,
    Montering,
    Soknad,
    Vedlikehold,
    Diverse,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InternalOrder {
    pub avdeling: String,
    pub date: String,
    pub employee_id: Uuid,
    pub beskrivelse: String,
    #[serde(default)]
    pub arbeidstid: f64,
    #[serde(default)]
    pub task_type: TaskType,
    #[serde(default)]
    pub kommentar: Option<String>,
}

impl Document for InternalOrder {
    const COLLECTION: &'static str = "internalorders";
    const LABEL: &'static str = "Internal order";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub produktnr: String,
    pub navn: String,
    #[serde(default)]
    pub beskrivelse: Option<String>,
    #[serde(default)]
    pub kategori: Option<String>,
    #[serde(default)]
    pub kundepris: f64,
    #[serde(default)]
    pub pa_lager: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Document for Product {
    const COLLECTION: &'static str = "products";
    const LABEL: &'static str = "Product";
}

/// A planned visiting order of customer sites for one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub date: String,
    pub anleggsnr_list: Vec<String>,
    #[serde(default)]
    pub optimized: bool,
}

impl Document for Route {
    const COLLECTION: &'static str = "routes";
    const LABEL: &'static str = "Route";
}

/// Route request body: the sites to visit, in any order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewRoute {
    pub date: String,
    pub anleggsnr_list: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WorkOrderFilter {
    pub status: Option<OrderStatus>,
    pub order_type: Option<OrderType>,
    pub employee_id: Option<Uuid>,
}

impl WorkOrderFilter {
    #[must_use]
    pub fn accepts(&self, wo: &WorkOrder) -> bool {
        self.status.is_none_or(|s| wo.status == s)
            && self.order_type.is_none_or(|t| wo.order_type == t)
            && self.employee_id.is_none_or(|e| wo.employee_id == e)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InternalOrderFilter {
    pub employee_id: Option<Uuid>,
    pub task_type: Option<TaskType>,
}

impl InternalOrderFilter {
    #[must_use]
    pub fn accepts(&self, order: &InternalOrder) -> bool {
        self.employee_id.is_none_or(|e| order.employee_id == e)
            && self.task_type.is_none_or(|t| order.task_type == t)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer {
            anleggsnr: "63798".to_owned(),
            kundennr: "1001".to_owned(),
            kundnavn: "Hansen Gaard".to_owned(),
            kommune: "Oslo".to_owned(),
            adresse: "Storgata 1".to_owned(),
            postnr: "0150".to_owned(),
            poststed: "Oslo".to_owned(),
            typenavn: Some("Biovac FD 5".to_owned()),
            ..Customer::default()
        }
    }

    #[test]
    fn search_matches_any_text_field_case_insensitively() {
        let c = customer();
        for needle in ["hansen", "637", "0150", "storgata", "fd 5", "oslo"] {
            assert!(c.matches(needle), "{needle}");
        }
        assert!(!c.matches("bergen"));
    }

    #[test]
    fn status_uses_norwegian_wire_names() {
        let json = serde_json::to_string(&OrderStatus::Fullfort).unwrap();
        assert_eq!(json, "\"fullf\u{f8}rt\"");
        let parsed: OrderStatus = serde_json::from_str("\"avbrutt\"").unwrap();
        assert_eq!(parsed, OrderStatus::Avbrutt);
    }

    #[test]
    fn work_order_defaults() {
        let wo: WorkOrder = serde_json::from_value(serde_json::json!({
            "customer_id": Uuid::nil(),
            "employee_id": Uuid::nil(),
            "date": "2025-01-15",
            "id": "ignored",
        }))
        .unwrap();
        assert_eq!(wo.order_type, OrderType::Service);
        assert_eq!(wo.status, OrderStatus::Planlagt);
        assert!(wo.arbeidstid.abs() < f64::EPSILON);
    }

    #[test]
    fn work_order_filter() {
        let wo = WorkOrder {
            order_type: OrderType::Ekstra,
            ..WorkOrder::default()
        };
        assert!(WorkOrderFilter::default().accepts(&wo));
        assert!(
            WorkOrderFilter {
                order_type: Some(OrderType::Ekstra),
                status: Some(OrderStatus::Planlagt),
                ..Default::default()
            }
            .accepts(&wo)
        );
        assert!(
            !WorkOrderFilter {
                status: Some(OrderStatus::Avbrutt),
                ..Default::default()
            }
            .accepts(&wo)
        );
    }
}
