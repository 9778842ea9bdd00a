//! Pure aggregations over the orders table.
//!
//! Grouping always keys on the `(city, state)` pair itself; the "City, State"
//! and "City (State)" strings are produced only for the output.

use contracts::dashboards::d100_city_sales::{
    CitySalesResponse, CitySalesRow, ComparisonDataset, ComparisonResponse, MetadataResponse,
    TOP_CITIES_LIMIT,
};
use contracts::shared::location::Location;
use std::collections::{BTreeMap, BTreeSet};

use crate::shared::data::orders_csv::OrderRecord;
use crate::shared::format::percent_share;

#[derive(Debug, Default, Clone, Copy)]
struct CityTotals {
    count: u64,
    sales: f64,
}

/// Sales by city for one year: top cities, total and the "others" remainder
pub fn yearly_city_ranking(orders: &[OrderRecord], year: &str) -> CitySalesResponse {
    let mut groups: BTreeMap<(&str, &str), CityTotals> = BTreeMap::new();

    for order in orders.iter().filter(|o| o.year() == year) {
        let totals = groups
            .entry((order.city.as_str(), order.state.as_str()))
            .or_default();
        totals.count += 1;
        totals.sales += order.sales;
    }

    let mut ranked: Vec<((&str, &str), CityTotals)> = groups.into_iter().collect();
    // Stable sort: equal sales keep (city, state) order
    ranked.sort_by(|(_, a), (_, b)| b.sales.total_cmp(&a.sales));

    // Shares are taken against every city of the year, not only the top ones
    let total_sales: f64 = ranked.iter().map(|(_, t)| t.sales).sum();

    let top_cities: Vec<CitySalesRow> = ranked
        .iter()
        .take(TOP_CITIES_LIMIT)
        .map(|((city, state), totals)| {
            let location = Location::new(*city, *state);
            CitySalesRow {
                city_state: location.listing_label(),
                city: location.city,
                state: location.state,
                count: totals.count,
                sales: totals.sales,
                share: percent_share(totals.sales, total_sales),
            }
        })
        .collect();

    let others_sales = if ranked.len() > TOP_CITIES_LIMIT {
        total_sales - top_cities.iter().map(|row| row.sales).sum::<f64>()
    } else {
        0.0
    };

    CitySalesResponse {
        year: year.to_string(),
        top_cities,
        total_sales,
        others_sales,
    }
}

/// Distinct "City, State" labels and distinct years over the whole table
pub fn metadata(orders: &[OrderRecord]) -> MetadataResponse {
    let locations: BTreeSet<(&str, &str)> = orders
        .iter()
        .map(|o| (o.city.as_str(), o.state.as_str()))
        .collect();

    let mut cities: Vec<String> = locations
        .into_iter()
        .map(|(city, state)| Location::new(city, state).listing_label())
        .collect();
    // Pair order and label order differ once a city contains ", "
    cities.sort();
    cities.dedup();

    let years: BTreeSet<&str> = orders.iter().map(|o| o.year()).collect();

    MetadataResponse {
        cities,
        years: years.into_iter().map(str::to_string).collect(),
    }
}

/// Yearly sales of two locations side by side.
///
/// `datasets[0]` always belongs to `first` and `datasets[1]` to `second`.
/// A year appears when either location has an order in it; the other
/// location gets 0 for that year.
pub fn comparison_series(
    orders: &[OrderRecord],
    first: &Location,
    second: &Location,
) -> ComparisonResponse {
    let mut sums: BTreeMap<(&str, &str, &str), f64> = BTreeMap::new();

    for order in orders
        .iter()
        .filter(|o| o.is_at(first) || o.is_at(second))
    {
        *sums
            .entry((order.year(), order.city.as_str(), order.state.as_str()))
            .or_insert(0.0) += order.sales;
    }

    let years: Vec<&str> = sums
        .keys()
        .map(|(year, _, _)| *year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    // Columns are looked up by the requested locations, never by key order
    let series = |location: &Location| ComparisonDataset {
        label: location.chart_label(),
        data: years
            .iter()
            .map(|year| {
                sums.get(&(*year, location.city.as_str(), location.state.as_str()))
                    .copied()
                    .unwrap_or(0.0)
            })
            .collect(),
    };

    let datasets = vec![series(first), series(second)];

    ComparisonResponse {
        years: years.into_iter().map(str::to_string).collect(),
        datasets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(date: &str, city: &str, state: &str, sales: f64) -> OrderRecord {
        OrderRecord::new(date, city, state, sales)
    }

    /// 15 orders in 2021 over 12 distinct (city, state) pairs, plus other years
    fn sample_orders() -> Vec<OrderRecord> {
        vec![
            order("2021-01-03", "Austin", "Texas", 1200.0),
            order("2021-02-11", "Austin", "Texas", 300.0),
            order("2021-01-20", "Chicago", "Illinois", 1400.0),
            order("2021-03-05", "Seattle", "Washington", 1300.0),
            order("2021-04-07", "Boston", "Massachusetts", 1100.0),
            order("2021-05-09", "Denver", "Colorado", 1000.0),
            order("2021-06-10", "Miami", "Florida", 900.0),
            order("2021-06-12", "Miami", "Florida", 50.0),
            order("2021-07-14", "Portland", "Oregon", 800.0),
            order("2021-08-15", "Portland", "Maine", 700.0),
            order("2021-09-18", "Phoenix", "Arizona", 600.0),
            order("2021-10-21", "Dallas", "Texas", 500.0),
            order("2021-11-23", "Springfield", "Illinois", 200.0),
            order("2021-12-24", "Springfield", "Missouri", 100.0),
            order("2021-12-30", "Springfield", "Missouri", 25.0),
            order("2020-05-01", "Chicago", "Illinois", 75.0),
            order("2022-07-01", "Austin", "Texas", 40.0),
        ]
    }

    #[test]
    fn test_ranking_truncates_to_top_ten() {
        let orders = sample_orders();
        let result = yearly_city_ranking(&orders, "2021");

        assert_eq!(result.year, "2021");
        assert_eq!(result.top_cities.len(), 10);

        let sales: Vec<f64> = result.top_cities.iter().map(|c| c.sales).collect();
        let mut sorted = sales.clone();
        sorted.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(sales, sorted);

        assert_eq!(result.top_cities[0].city_state, "Austin, Texas");
        assert_eq!(result.top_cities[0].count, 2);
        assert_eq!(result.top_cities[0].sales, 1500.0);

        // The two Springfields are left out: 200 + 125
        assert_eq!(result.others_sales, 325.0);
        assert_eq!(result.total_sales, 10175.0);

        let top_sum: f64 = sales.iter().sum();
        assert!((top_sum + result.others_sales - result.total_sales).abs() < 1e-9);
    }

    #[test]
    fn test_share_uses_full_year_total() {
        let orders = sample_orders();
        let result = yearly_city_ranking(&orders, "2021");

        let austin = &result.top_cities[0];
        assert_eq!(austin.share, percent_share(1500.0, 10175.0));
        assert_eq!(austin.share, 14.74);

        let returned_share: f64 = result.top_cities.iter().map(|c| c.share).sum();
        assert!(returned_share < 100.0);
    }

    #[test]
    fn test_ranking_keeps_states_apart() {
        let orders = vec![
            order("2021-01-01", "Portland", "Oregon", 10.0),
            order("2021-01-02", "Portland", "Maine", 20.0),
            order("2021-01-03", "Portland", "Oregon", 5.0),
        ];
        let result = yearly_city_ranking(&orders, "2021");

        assert_eq!(result.top_cities.len(), 2);
        assert_eq!(result.top_cities[0].city_state, "Portland, Maine");
        assert_eq!(result.top_cities[0].count, 1);
        assert_eq!(result.top_cities[1].city_state, "Portland, Oregon");
        assert_eq!(result.top_cities[1].count, 2);
        assert_eq!(result.top_cities[1].sales, 15.0);
        assert_eq!(result.others_sales, 0.0);

        let shares: f64 = result.top_cities.iter().map(|c| c.share).sum();
        assert!((shares - 100.0).abs() < 0.02);
    }

    #[test]
    fn test_ranking_unknown_year_is_empty() {
        let orders = sample_orders();
        let result = yearly_city_ranking(&orders, "1999");

        assert!(result.top_cities.is_empty());
        assert_eq!(result.total_sales, 0.0);
        assert_eq!(result.others_sales, 0.0);
    }

    #[test]
    fn test_ranking_year_is_exact_prefix_match() {
        let orders = vec![order("2021-01-01", "Austin", "Texas", 10.0)];
        assert!(yearly_city_ranking(&orders, "202").top_cities.is_empty());
        assert!(yearly_city_ranking(&orders, "2021-01").top_cities.is_empty());
        assert_eq!(yearly_city_ranking(&orders, "2021").top_cities.len(), 1);
    }

    #[test]
    fn test_ranking_zero_total_has_zero_shares() {
        let orders = vec![
            order("2021-01-01", "Austin", "Texas", 0.0),
            order("2021-01-02", "Dallas", "Texas", 0.0),
        ];
        let result = yearly_city_ranking(&orders, "2021");

        assert_eq!(result.total_sales, 0.0);
        assert!(result.top_cities.iter().all(|c| c.share == 0.0));
    }

    #[test]
    fn test_metadata_lists_distinct_sorted_values() {
        let orders = sample_orders();
        let meta = metadata(&orders);

        assert_eq!(meta.years, vec!["2020", "2021", "2022"]);
        assert_eq!(
            meta.cities,
            vec![
                "Austin, Texas",
                "Boston, Massachusetts",
                "Chicago, Illinois",
                "Dallas, Texas",
                "Denver, Colorado",
                "Miami, Florida",
                "Phoenix, Arizona",
                "Portland, Maine",
                "Portland, Oregon",
                "Seattle, Washington",
                "Springfield, Illinois",
                "Springfield, Missouri",
            ]
        );
    }

    #[test]
    fn test_metadata_sort_is_case_sensitive() {
        let orders = vec![
            order("2021-01-01", "austin", "Texas", 1.0),
            order("2021-01-01", "Boston", "Massachusetts", 1.0),
            order("2021-01-01", "Austin", "Texas", 1.0),
        ];
        let meta = metadata(&orders);
        assert_eq!(
            meta.cities,
            vec!["Austin, Texas", "Boston, Massachusetts", "austin, Texas"]
        );
        assert_eq!(meta.years, vec!["2021"]);
    }

    #[test]
    fn test_metadata_empty_table() {
        let meta = metadata(&[]);
        assert!(meta.cities.is_empty());
        assert!(meta.years.is_empty());
    }

    #[test]
    fn test_comparison_keeps_requested_order() {
        let orders = vec![
            order("2020-01-01", "Chicago", "Illinois", 5.0),
            order("2021-01-01", "Chicago", "Illinois", 7.0),
            order("2021-02-01", "Austin", "Texas", 3.0),
            order("2021-03-01", "Austin", "Texas", 4.0),
        ];
        let austin = Location::new("Austin", "Texas");
        let chicago = Location::new("Chicago", "Illinois");

        let result = comparison_series(&orders, &austin, &chicago);
        assert_eq!(result.years, vec!["2020", "2021"]);
        assert_eq!(result.datasets.len(), 2);
        assert_eq!(result.datasets[0].label, "Austin (Texas)");
        assert_eq!(result.datasets[0].data, vec![0.0, 7.0]);
        assert_eq!(result.datasets[1].label, "Chicago (Illinois)");
        assert_eq!(result.datasets[1].data, vec![5.0, 7.0]);

        let swapped = comparison_series(&orders, &chicago, &austin);
        assert_eq!(swapped.datasets[0].label, "Chicago (Illinois)");
        assert_eq!(swapped.datasets[0].data, vec![5.0, 7.0]);
        assert_eq!(swapped.datasets[1].label, "Austin (Texas)");
        assert_eq!(swapped.datasets[1].data, vec![0.0, 7.0]);
    }

    #[test]
    fn test_comparison_matches_exact_pairs_only() {
        let orders = vec![
            order("2021-01-01", "Springfield", "Illinois", 10.0),
            order("2021-01-01", "Springfield", "Missouri", 99.0),
            order("2022-01-01", "springfield", "Illinois", 50.0),
            order("2023-01-01", "Peoria", "Illinois", 1.0),
        ];
        let result = comparison_series(
            &orders,
            &Location::new("Springfield", "Illinois"),
            &Location::new("Peoria", "Illinois"),
        );

        assert_eq!(result.years, vec!["2021", "2023"]);
        assert_eq!(result.datasets[0].data, vec![10.0, 0.0]);
        assert_eq!(result.datasets[1].data, vec![0.0, 1.0]);
    }

    #[test]
    fn test_comparison_without_data() {
        let orders = sample_orders();
        let result = comparison_series(
            &orders,
            &Location::new("Nowhere", "Kansas"),
            &Location::new("Austin", "Texas"),
        );

        assert_eq!(result.years, vec!["2021", "2022"]);
        assert_eq!(result.datasets[0].data, vec![0.0, 0.0]);
        assert_eq!(result.datasets[1].data, vec![1500.0, 40.0]);

        let empty = comparison_series(
            &[],
            &Location::new("Austin", "Texas"),
            &Location::new("Dallas", "Texas"),
        );
        assert!(empty.years.is_empty());
        assert_eq!(empty.datasets.len(), 2);
        assert!(empty.datasets.iter().all(|d| d.data.is_empty()));
    }

    #[test]
    fn test_comparison_same_location_twice() {
        let orders = vec![order("2021-01-01", "Austin", "Texas", 8.0)];
        let austin = Location::new("Austin", "Texas");
        let result = comparison_series(&orders, &austin, &austin);

        assert_eq!(result.datasets[0], result.datasets[1]);
        assert_eq!(result.datasets[0].data, vec![8.0]);
    }
}
