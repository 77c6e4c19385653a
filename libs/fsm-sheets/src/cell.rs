use calamine::Data;

/// Markers a spreadsheet export uses for "no value".
const NA_MARKERS: [&str; 6] = ["na", "n/a", "nan", "null", "none", "#n/a"];

/// One decoded spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Self::Empty,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Self::Text(s.clone()),
            #[allow(clippy::cast_precision_loss)]
            Data::Int(i) => Self::Number(*i as f64),
            Data::Float(f) => Self::Number(*f),
            Data::Bool(b) => Self::Bool(*b),
            Data::DateTime(dt) => Self::Text(dt.to_string()),
        }
    }
}

impl Cell {
    /// Trimmed text; blank and NA markers become `None`. Whole numbers are
    /// rendered without a fractional part.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(s) => {
                let t = s.trim();
                if t.is_empty() || NA_MARKERS.contains(&t.to_ascii_lowercase().as_str()) {
                    None
                } else {
                    Some(t.to_owned())
                }
            }
            Self::Number(f) if !f.is_finite() => None,
            Self::Number(f) if f.fract() == 0.0 => Some(format!("{f:.0}")),
            Self::Number(f) => Some(f.to_string()),
            Self::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_owned()),
        }
    }

    /// Identifier text: numeric cells are truncated to an integer string
    /// (`63798.0` -> `"63798"`); text cells are kept verbatim (trimmed), so
    /// leading zeros in postal codes typed as text survive.
    #[must_use]
    pub fn int_text(&self) -> Option<String> {
        match self {
            Self::Number(f) if f.is_finite() => Some(format!("{:.0}", f.trunc())),
            other => other.text(),
        }
    }

    /// Numeric value; text is parsed leniently (`"1 490,50"` -> `1490.5`).
    #[must_use]
    pub fn number(&self) -> Option<f64> {
        match self {
            Self::Number(f) if f.is_finite() => Some(*f),
            Self::Text(_) => {
                let text = self.text()?;
                let normalized: String = text
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| if c == ',' { '.' } else { c })
                    .collect();
                normalized.parse::<f64>().ok().filter(|f| f.is_finite())
            }
            _ => None,
        }
    }
}
