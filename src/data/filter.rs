use super::model::{Controls, PayloadRange, SiteSelection, TableView};

// ---------------------------------------------------------------------------
// Row predicates over a read-only view
// ---------------------------------------------------------------------------

/// Keep rows launched from the selected site.
///
/// `SiteSelection::All` returns the view unchanged. A site that appears in no
/// row yields an empty view.
pub fn filter_by_site<'a>(view: &TableView<'a>, site: &SiteSelection) -> TableView<'a> {
    match site {
        SiteSelection::All => view.clone(),
        SiteSelection::Site(name) => retain(view, |i| view.table().records()[i].launch_site == *name),
    }
}

/// Keep rows with `low <= payload <= high`.
pub fn filter_by_payload_range<'a>(view: &TableView<'a>, range: &PayloadRange) -> TableView<'a> {
    retain(view, |i| range.contains(view.table().records()[i].payload_mass_kg))
}

/// Apply both predicates: payload range first, then site.
pub fn apply<'a>(view: &TableView<'a>, controls: &Controls) -> TableView<'a> {
    let in_range = filter_by_payload_range(view, &controls.payload);
    filter_by_site(&in_range, &controls.site)
}

fn retain<'a>(view: &TableView<'a>, keep: impl Fn(usize) -> bool) -> TableView<'a> {
    let indices = view.indices().iter().copied().filter(|&i| keep(i)).collect();
    TableView::with_indices(view.table(), indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, LaunchTable, OutcomeClass};
    use proptest::prelude::*;

    const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

    fn rec(site: &str, payload: f64, class: OutcomeClass) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: payload,
            booster_version_category: "v1.1".to_string(),
            class,
            flight_number: None,
            booster_version: None,
        }
    }

    fn scenario() -> LaunchTable {
        LaunchTable::from_records(vec![
            rec("A", 500.0, OutcomeClass::Success),
            rec("A", 3000.0, OutcomeClass::Failure),
            rec("B", 1500.0, OutcomeClass::Success),
            rec("B", 5000.0, OutcomeClass::Failure),
        ])
    }

    fn arb_table() -> impl Strategy<Value = LaunchTable> {
        prop::collection::vec((0..SITES.len(), 0.0..10_000.0f64, any::<bool>()), 0..40).prop_map(
            |rows| {
                LaunchTable::from_records(
                    rows.into_iter()
                        .map(|(s, p, ok)| {
                            let class = if ok { OutcomeClass::Success } else { OutcomeClass::Failure };
                            rec(SITES[s], p, class)
                        })
                        .collect(),
                )
            },
        )
    }

    fn arb_site() -> impl Strategy<Value = SiteSelection> {
        prop_oneof![
            Just(SiteSelection::All),
            (0..SITES.len()).prop_map(|i| SiteSelection::Site(SITES[i].to_string())),
            Just(SiteSelection::Site("Boca Chica".to_string())),
        ]
    }

    #[test]
    fn site_filter_keeps_matching_rows_in_order() {
        let table = scenario();
        let b = filter_by_site(&table.view(), &SiteSelection::from("B"));
        assert_eq!(b.indices(), &[2, 3]);
    }

    #[test]
    fn unknown_site_is_empty_not_an_error() {
        let table = scenario();
        assert!(filter_by_site(&table.view(), &SiteSelection::from("Boca Chica")).is_empty());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let table = scenario();
        let v = filter_by_payload_range(&table.view(), &PayloadRange::new(1500.0, 3000.0));
        assert_eq!(v.indices(), &[1, 2]);
    }

    #[test]
    fn inverted_range_selects_nothing() {
        let table = scenario();
        assert!(filter_by_payload_range(&table.view(), &PayloadRange::new(3000.0, 1500.0)).is_empty());
    }

    #[test]
    fn apply_combines_both_predicates() {
        let table = scenario();
        let controls = Controls {
            site: SiteSelection::from("A"),
            payload: PayloadRange::new(1000.0, 5000.0),
        };
        assert_eq!(apply(&table.view(), &controls).indices(), &[1]);
    }

    proptest! {
        #[test]
        fn all_sites_is_identity(table in arb_table()) {
            let view = table.view();
            prop_assert_eq!(filter_by_site(&view, &SiteSelection::All), view);
        }

        #[test]
        fn absent_site_yields_empty(table in arb_table()) {
            let v = filter_by_site(&table.view(), &SiteSelection::from("Boca Chica"));
            prop_assert!(v.is_empty());
        }

        #[test]
        fn low_above_high_yields_empty(table in arb_table(), low in 0.0..10_000.0f64, gap in 0.001..5_000.0f64) {
            let v = filter_by_payload_range(&table.view(), &PayloadRange::new(low + gap, low));
            prop_assert!(v.is_empty());
        }

        #[test]
        fn full_bounds_keep_every_row(table in arb_table()) {
            let view = table.view();
            prop_assert_eq!(filter_by_payload_range(&view, &table.full_payload_range()).len(), table.len());
            if !table.is_empty() {
                prop_assert_eq!(filter_by_payload_range(&view, &table.full_payload_range()), view);
            }
        }

        #[test]
        fn filters_commute(
            table in arb_table(),
            site in arb_site(),
            lo in 0.0..10_000.0f64,
            hi in 0.0..10_000.0f64,
        ) {
            let view = table.view();
            let range = PayloadRange::new(lo, hi);
            let range_then_site = filter_by_site(&filter_by_payload_range(&view, &range), &site);
            let site_then_range = filter_by_payload_range(&filter_by_site(&view, &site), &range);
            prop_assert_eq!(range_then_site, site_then_range);
        }
    }
}
