use fsm_db::{Collection, DocumentStore};

use super::model::{Equipment, Incident, RiskAssessment, Training};

/// The four HSE registers over one document store.
pub struct HseService {
    risk_assessments: Collection<RiskAssessment>,
    incidents: Collection<Incident>,
    training: Collection<Training>,
    equipment: Collection<Equipment>,
}

impl HseService {
    #[must_use]
    pub fn new(store: DocumentStore) -> Self {
        Self {
            risk_assessments: Collection::new(store.clone()),
            incidents: Collection::new(store.clone()),
            training: Collection::new(store.clone()),
            equipment: Collection::new(store),
        }
    }

    #[must_use]
    pub fn risk_assessments(&self) -> &Collection<RiskAssessment> {
        &self.risk_assessments
    }

    #[must_use]
    pub fn incidents(&self) -> &Collection<Incident> {
        &self.incidents
    }

    #[must_use]
    pub fn training(&self) -> &Collection<Training> {
        &self.training
    }

    #[must_use]
    pub fn equipment(&self) -> &Collection<Equipment> {
        &self.equipment
    }
}
