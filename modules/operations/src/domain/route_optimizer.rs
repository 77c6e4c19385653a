//! Deterministic visiting order for a set of customer sites.
//!
//! Sites are ordered by postal code, then street address, both compared as
//! strings. A site without a postal code sorts as `"9999"`. Requested ids
//! with no matching customer are dropped.

use std::collections::HashSet;

use super::model::Customer;

const MISSING_POSTNR: &str = "9999";

/// Order `requested` sites using the caller's `customers`.
///
/// Each requested `anleggsnr` contributes every matching customer once, even
/// when requested twice. Sites with equal postal code and address keep the
/// order in which they were requested.
#[must_use]
pub fn optimize(customers: &[Customer], requested: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut hits: Vec<&Customer> = Vec::new();
    for id in requested {
        if seen.insert(id.as_str()) {
            hits.extend(customers.iter().filter(|c| c.anleggsnr == *id));
        }
    }
    hits.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    hits.into_iter().map(|c| c.anleggsnr.clone()).collect()
}

fn sort_key(c: &Customer) -> (&str, &str) {
    let postnr = if c.postnr.trim().is_empty() {
        MISSING_POSTNR
    } else {
        c.postnr.as_str()
    };
    (postnr, c.adresse.as_str())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn site(anleggsnr: &str, postnr: &str, adresse: &str) -> Customer {
        Customer {
            anleggsnr: anleggsnr.to_owned(),
            postnr: postnr.to_owned(),
            adresse: adresse.to_owned(),
            ..Customer::default()
        }
    }

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn orders_by_postal_code() {
        let customers = [
            site("A", "0500", "Gate 1"),
            site("B", "0150", "Gate 2"),
            site("C", "9999", "Gate 3"),
        ];
        let out = optimize(&customers, &ids(&["C", "A", "B"]));
        assert_eq!(out, ids(&["B", "A", "C"]));
    }

    #[test]
    fn unknown_ids_are_dropped() {
        let customers = [site("A", "0500", "x")];
        let out = optimize(&customers, &ids(&["A", "ZZZ"]));
        assert_eq!(out, ids(&["A"]));
    }

    #[test]
    fn address_breaks_postal_code_ties() {
        let customers = [
            site("A", "5003", "Strandkaien 9"),
            site("B", "5003", "Bryggen 1"),
        ];
        assert_eq!(optimize(&customers, &ids(&["A", "B"])), ids(&["B", "A"]));
    }

    #[test]
    fn full_ties_keep_requested_order() {
        let customers = [site("A", "0150", "Gate 1"), site("B", "0150", "Gate 1")];
        assert_eq!(optimize(&customers, &ids(&["B", "A"])), ids(&["B", "A"]));
        assert_eq!(optimize(&customers, &ids(&["A", "B"])), ids(&["A", "B"]));
    }

    #[test]
    fn repeated_ids_are_listed_once() {
        let customers = [site("A", "0150", "x"), site("B", "0200", "x")];
        assert_eq!(optimize(&customers, &ids(&["B", "A", "B"])), ids(&["A", "B"]));
    }

    #[test]
    fn missing_postal_code_sorts_last() {
        let customers = [site("A", "", "x"), site("B", "9000", "x")];
        assert_eq!(optimize(&customers, &ids(&["A", "B"])), ids(&["B", "A"]));
    }

    #[test]
    fn customers_not_requested_are_ignored() {
        let customers = [site("A", "0001", "x"), site("B", "0002", "x")];
        assert_eq!(optimize(&customers, &ids(&["B"])), ids(&["B"]));
        assert!(optimize(&customers, &[]).is_empty());
    }
}
