// Dashboards (d100)
pub mod d100_city_sales;
