pub mod orders_csv;
