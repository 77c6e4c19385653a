//! HSE record shapes. Status and severity values are free text with the
//! defaults the web client expects.

use fsm_db::Document;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn middels() -> String {
    "middels".to_owned()
}

fn aktiv() -> String {
    "aktiv".to_owned()
}

fn ulykke() -> String {
    "ulykke".to_owned()
}

fn apen() -> String {
    "\u{e5}pen".to_owned()
}

fn lav() -> String {
    "lav".to_owned()
}

fn ok() -> String {
    "ok".to_owned()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub tittel: String,
    pub beskrivelse: String,
    pub dato: String,
    #[serde(default = "middels")]
    pub alvorlighetsgrad: String,
    #[serde(default = "aktiv")]
    pub status: String,
    #[serde(default)]
    pub ansvarlig: Option<String>,
}

impl Document for RiskAssessment {
    const COLLECTION: &'static str = "hms_risk_assessments";
    const LABEL: &'static str = "Risk assessment";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub dato: String,
    pub beskrivelse: String,
    #[serde(rename = "type", default = "ulykke")]
    pub kind: String,
    #[serde(default = "apen")]
    pub status: String,
    #[serde(default = "lav")]
    pub alvorlighetsgrad: String,
}

impl Document for Incident {
    const COLLECTION: &'static str = "hms_incidents";
    const LABEL: &'static str = "Incident";
}

/// A course or certification and the employees who hold it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Training {
    pub navn: String,
    pub beskrivelse: String,
    pub dato: String,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default = "aktiv")]
    pub status: String,
    #[serde(default)]
    pub ansatte: Vec<Uuid>,
}

impl Document for Training {
    const COLLECTION: &'static str = "hms_training";
    const LABEL: &'static str = "Training";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub navn: String,
    pub control_date: String,
    pub next_control: String,
    #[serde(default = "ok")]
    pub status: String,
}

impl Document for Equipment {
    const COLLECTION: &'static str = "hms_equipment";
    const LABEL: &'static str = "Equipment";
}
