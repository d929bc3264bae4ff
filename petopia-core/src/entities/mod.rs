pub mod order_records;
