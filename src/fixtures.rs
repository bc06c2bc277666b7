//! Entities shared by the unit tests.

use crate::schema::{Entity, FieldDefinition, LogicalType, TableBuilder, TableDefinition};

pub struct Customer;
pub struct Order;
pub struct OrderLine;
pub struct Product;
/// Minimal table matching the documentation examples.
pub struct Trade;
/// Identity key and nothing else to index or reference.
pub struct Counter;

impl Entity for Customer {
    fn describe() -> TableBuilder {
        TableDefinition::builder("Customer")
            .table_name("Customers")
            .field(FieldDefinition::new("Id", LogicalType::Integer).primary_key().identity())
            .field(FieldDefinition::new("Name", LogicalType::String).size(100))
            .field(FieldDefinition::new("Email", LogicalType::String).size(200).nullable().unique())
            .field(FieldDefinition::new("Active", LogicalType::Boolean))
    }
}

impl Entity for Order {
    fn describe() -> TableBuilder {
        TableDefinition::builder("Order")
            .table_name("Orders")
            .field(FieldDefinition::new("Id", LogicalType::Integer).primary_key().identity())
            .field(
                FieldDefinition::new("CustomerId", LogicalType::Integer)
                    .references("Customers", "Id")
                    .indexed(),
            )
            .field(FieldDefinition::new("Amount", LogicalType::Decimal).size(18).precision(2))
            .field(FieldDefinition::new("Name", LogicalType::String).size(50))
            .field(FieldDefinition::new("Shipped", LogicalType::Boolean))
            .field(FieldDefinition::new("PlacedAt", LogicalType::DateTime))
    }
}

impl Entity for OrderLine {
    fn describe() -> TableBuilder {
        TableDefinition::builder("OrderLine")
            .table_name("OrderLines")
            .field(
                FieldDefinition::new("OrderId", LogicalType::Integer)
                    .primary_key()
                    .references("Orders", "Id"),
            )
            .field(FieldDefinition::new("LineNo", LogicalType::Integer).primary_key())
            .field(FieldDefinition::new("Sku", LogicalType::String).size(20).index_named("IX_Sku_Qty"))
            .field(FieldDefinition::new("Qty", LogicalType::Integer).index_named("IX_Sku_Qty"))
    }
}

impl Entity for Product {
    fn describe() -> TableBuilder {
        TableDefinition::builder("Product")
            .table_name("Products")
            .field(FieldDefinition::new("Sku", LogicalType::String).size(20).primary_key())
            .field(FieldDefinition::new("Price", LogicalType::Decimal).size(10).precision(2))
            .field(FieldDefinition::new("Notes", LogicalType::String).nullable())
            .field(FieldDefinition::new("Cache", LogicalType::Binary).ignore())
    }
}

impl Entity for Trade {
    fn describe() -> TableBuilder {
        TableDefinition::builder("T")
            .field(FieldDefinition::new("Id", LogicalType::Integer).primary_key())
            .field(FieldDefinition::new("Amount", LogicalType::Decimal))
            .field(FieldDefinition::new("Name", LogicalType::String).size(50))
    }
}

impl Entity for Counter {
    fn describe() -> TableBuilder {
        TableDefinition::builder("Counter")
            .table_name("Counters")
            .field(FieldDefinition::new("Id", LogicalType::Integer).primary_key().identity())
            .field(FieldDefinition::new("Name", LogicalType::String).size(40))
    }
}
