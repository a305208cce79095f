//! Request and response contract of the pricing call.
//!
//! These types carry the shape an outer layer (HTTP handler, CLI) exchanges with the
//! engine. Absent fields are modelled as `Option` so the rejection happens here, as a
//! [`PricingError::InvalidInput`], instead of in a deserializer.

use crate::error::PricingError;
use crate::types::{
    Customer, TicketCalculation, TicketCategory, TransactionCalculation, TransactionId, round_money,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

/// Incoming pricing request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    /// Transaction identifier
    pub transaction_id: Option<i64>,
    /// Customers to price
    pub customers: Option<Vec<CustomerRequest>>,
}

/// One customer as received
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRequest {
    /// Customer name
    pub name: Option<String>,
    /// Age in years
    pub age: Option<i32>,
}

impl PricingRequest {
    /// Validate the request and split it into engine inputs.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidInput`] if the transaction id is missing, the
    /// customer list is missing or empty, or any customer lacks a name or age, has a
    /// blank name, or has a negative age.
    pub fn into_parts(self) -> Result<(TransactionId, Vec<Customer>), PricingError> {
        let transaction_id = self
            .transaction_id
            .map(TransactionId::new)
            .ok_or_else(|| {
                PricingError::InvalidInput("Transaction ID cannot be null".to_string())
            })?;

        let customers = self
            .customers
            .filter(|customers| !customers.is_empty())
            .ok_or_else(|| {
                PricingError::InvalidInput("Customers list cannot be null or empty".to_string())
            })?
            .into_iter()
            .map(|customer| {
                let age = customer.age.ok_or_else(|| {
                    PricingError::InvalidInput("Customer age cannot be null".to_string())
                })?;
                let name = customer.name.ok_or_else(|| {
                    PricingError::InvalidInput("Customer name cannot be null or empty".to_string())
                })?;
                let customer = Customer::new(name, age);
                customer.validate()?;
                Ok(customer)
            })
            .collect::<Result<Vec<_>, PricingError>>()?;

        Ok((transaction_id, customers))
    }
}

/// Serialize money as a JSON number rounded half-up to cents
///
/// # Errors
///
/// Fails if the amount cannot be represented as an `f64`.
pub fn serialize_money<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let rounded = round_money(*amount)
        .to_f64()
        .ok_or_else(|| {
            <S::Error as serde::ser::Error>::custom(format!("amount out of range: {amount}"))
        })?;
    serializer.serialize_f64(rounded)
}

/// One priced ticket line as returned
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    /// Category priced
    pub ticket_type: TicketCategory,
    /// Number of tickets
    pub quantity: u32,
    /// Total for the line
    #[serde(serialize_with = "serialize_money")]
    pub total_cost: Decimal,
    /// Whether a discount reduced the line
    pub discount_applied: bool,
}

impl From<&TicketCalculation> for TicketResponse {
    fn from(ticket: &TicketCalculation) -> Self {
        Self {
            ticket_type: ticket.category,
            quantity: ticket.quantity,
            total_cost: ticket.total_cost,
            discount_applied: ticket.discount_applied,
        }
    }
}

/// Priced transaction as returned
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    /// Transaction identifier echoed back
    pub transaction_id: TransactionId,
    /// Priced lines, ordered by category display name
    pub tickets: Vec<TicketResponse>,
    /// Transaction total
    #[serde(serialize_with = "serialize_money")]
    pub total_cost: Decimal,
}

impl From<&TransactionCalculation> for PricingResponse {
    fn from(calculation: &TransactionCalculation) -> Self {
        Self {
            transaction_id: calculation.transaction_id(),
            tickets: calculation
                .ticket_calculations()
                .iter()
                .map(TicketResponse::from)
                .collect(),
            total_cost: calculation.total_cost(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn request(value: serde_json::Value) -> PricingRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_into_parts() {
        let (id, customers) = request(json!({
            "transactionId": 1,
            "customers": [ { "name": "John Smith", "age": 70 }, { "name": "Jane Doe", "age": 5 } ]
        }))
        .into_parts()
        .unwrap();

        assert_eq!(id, TransactionId::new(1));
        assert_eq!(customers, vec![Customer::new("John Smith", 70), Customer::new("Jane Doe", 5)]);
    }

    #[test]
    fn test_missing_fields_are_invalid_input() {
        let cases = [
            json!({ "customers": [ { "name": "A", "age": 1 } ] }),
            json!({ "transactionId": 1 }),
            json!({ "transactionId": 1, "customers": [] }),
            json!({ "transactionId": 1, "customers": [ { "name": "A" } ] }),
            json!({ "transactionId": 1, "customers": [ { "age": 4 } ] }),
            json!({ "transactionId": 1, "customers": [ { "name": " ", "age": 4 } ] }),
            json!({ "transactionId": 1, "customers": [ { "name": "A", "age": -2 } ] }),
        ];

        for case in cases {
            let result = request(case.clone()).into_parts();
            assert!(
                matches!(result, Err(PricingError::InvalidInput(_))),
                "expected rejection for {case}"
            );
        }
    }

    #[test]
    fn test_response_serializes_rounded_numbers() {
        let calculation = TransactionCalculation::from_tickets(
            TransactionId::new(2),
            vec![
                TicketCalculation::new(TicketCategory::Senior, 1, dec!(17.50), true),
                TicketCalculation::new(TicketCategory::Children, 2, dec!(10.00), false),
            ],
        );

        let value = serde_json::to_value(PricingResponse::from(&calculation)).unwrap();

        assert_eq!(
            value,
            json!({
                "transactionId": 2,
                "tickets": [
                    { "ticketType": "CHILDREN", "quantity": 2, "totalCost": 10.0, "discountApplied": false },
                    { "ticketType": "SENIOR", "quantity": 1, "totalCost": 17.5, "discountApplied": true }
                ],
                "totalCost": 27.5
            })
        );
    }
}
