//! The fixed set of error kinds the API reports.
//!
//! Modules map their domain errors onto one of these and supply the
//! occurrence-specific `detail`.

use http::StatusCode;

use crate::problem::Problem;

const TYPE_BASE: &str = "https://errors.firmanager.no/";

#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: StatusCode,
    pub title: &'static str,
    pub code: &'static str,
    /// Last segment of the problem type URI.
    pub slug: &'static str,
}

impl ErrDef {
    #[must_use]
    pub fn type_url(&self) -> String {
        format!("{TYPE_BASE}{}", self.slug)
    }

    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        Problem {
            type_url: self.type_url(),
            code: self.code.to_owned(),
            ..Problem::new(self.status, self.title, detail)
        }
    }

    /// [`ErrDef::as_problem`] for a concrete request path and trace.
    pub fn with_context(
        &self,
        detail: impl Into<String>,
        instance: &str,
        trace_id: Option<String>,
    ) -> Problem {
        self.as_problem(detail)
            .with_instance(instance)
            .with_trace_id(trace_id)
    }
}

pub const BAD_REQUEST: ErrDef = ErrDef {
    status: StatusCode::BAD_REQUEST,
    title: "Bad Request",
    code: "fsm.bad_request",
    slug: "bad-request",
};

pub const UNAUTHORIZED: ErrDef = ErrDef {
    status: StatusCode::UNAUTHORIZED,
    title: "Unauthorized",
    code: "fsm.unauthorized",
    slug: "unauthorized",
};

pub const FORBIDDEN: ErrDef = ErrDef {
    status: StatusCode::FORBIDDEN,
    title: "Forbidden",
    code: "fsm.forbidden",
    slug: "forbidden",
};

pub const NOT_FOUND: ErrDef = ErrDef {
    status: StatusCode::NOT_FOUND,
    title: "Not Found",
    code: "fsm.not_found",
    slug: "not-found",
};

pub const INTERNAL: ErrDef = ErrDef {
    status: StatusCode::INTERNAL_SERVER_ERROR,
    title: "Internal Server Error",
    code: "fsm.internal",
    slug: "internal",
};
