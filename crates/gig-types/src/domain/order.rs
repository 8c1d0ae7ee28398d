use serde::{Deserialize, Serialize};

/// The six descriptive fields of a delivery order.
///
/// Creation and update both carry a full set; there is no partial form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderDetails {
    pub description: String,
    pub contact: String,
    pub pickup_location: String,
    pub delivery_location: String,
    pub delivery_time: String,
    pub delivery_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub description: String,
    pub contact: String,
    pub pickup_location: String,
    pub delivery_location: String,
    pub delivery_time: String,
    pub delivery_date: String,
}

impl Order {
    pub fn new(id: i64, details: OrderDetails) -> Self {
        Self {
            id,
            description: details.description,
            contact: details.contact,
            pickup_location: details.pickup_location,
            delivery_location: details.delivery_location,
            delivery_time: details.delivery_time,
            delivery_date: details.delivery_date,
        }
    }

    /// Overwrites every descriptive field; the id is kept.
    pub fn replace_details(&mut self, details: OrderDetails) {
        *self = Self::new(self.id, details);
    }

    pub fn details(&self) -> OrderDetails {
        OrderDetails {
            description: self.description.clone(),
            contact: self.contact.clone(),
            pickup_location: self.pickup_location.clone(),
            delivery_location: self.delivery_location.clone(),
            delivery_time: self.delivery_time.clone(),
            delivery_date: self.delivery_date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(description: &str) -> OrderDetails {
        OrderDetails {
            description: description.into(),
            contact: "555-1234".into(),
            pickup_location: "A".into(),
            delivery_location: "B".into(),
            delivery_time: "10:00".into(),
            delivery_date: "2024-01-01".into(),
        }
    }

    #[test]
    fn new_order_carries_details_and_id() {
        let order = Order::new(7, details("box"));
        assert_eq!(order.id, 7);
        assert_eq!(order.details(), details("box"));
    }

    #[test]
    fn replace_details_overwrites_all_fields() {
        let mut order = Order::new(3, details("box"));
        let next = OrderDetails {
            description: "crate".into(),
            contact: "555-0000".into(),
            pickup_location: "C".into(),
            delivery_location: "D".into(),
            delivery_time: "18:30".into(),
            delivery_date: "2024-02-02".into(),
        };
        order.replace_details(next.clone());
        assert_eq!(order.id, 3);
        assert_eq!(order.details(), next);
    }

    #[test]
    fn serializes_to_flat_wire_shape() {
        let order = Order::new(1, details("box"));
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "description": "box",
                "contact": "555-1234",
                "pickup_location": "A",
                "delivery_location": "B",
                "delivery_time": "10:00",
                "delivery_date": "2024-01-01"
            })
        );
    }

    #[test]
    fn details_reject_missing_keys() {
        let partial = serde_json::json!({ "description": "box", "contact": "555" });
        assert!(serde_json::from_value::<OrderDetails>(partial).is_err());
    }
}
