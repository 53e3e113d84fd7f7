//! Staff member read model.
//!
//! Staff identity is owned by an external directory; the engine only
//! reads it to resolve hourly rates and positions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A staff member as seen by the engine.
///
/// # Example
///
/// ```
/// use staffops_engine::models::StaffMember;
/// use rust_decimal::Decimal;
///
/// let staff = StaffMember {
///     id: "staff_001".to_string(),
///     name: "Aoi Tanaka".to_string(),
///     hourly_rate: Decimal::new(1200, 0),
///     position: "server".to_string(),
/// };
/// assert_eq!(staff.hourly_rate, Decimal::new(1200, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Unique identifier for the staff member.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Base hourly rate in the business currency.
    pub hourly_rate: Decimal,
    /// Position code (e.g., "server", "kitchen", "manager").
    pub position: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_member_serialization_round_trip() {
        let staff = StaffMember {
            id: "staff_001".to_string(),
            name: "Aoi Tanaka".to_string(),
            hourly_rate: Decimal::new(1200, 0),
            position: "server".to_string(),
        };

        let json = serde_json::to_string(&staff).unwrap();
        let deserialized: StaffMember = serde_json::from_str(&json).unwrap();
        assert_eq!(staff, deserialized);
    }

    #[test]
    fn test_deserialize_staff_member() {
        let json = r#"{
            "id": "staff_002",
            "name": "Ren Sato",
            "hourly_rate": "1350",
            "position": "kitchen"
        }"#;

        let staff: StaffMember = serde_json::from_str(json).unwrap();
        assert_eq!(staff.id, "staff_002");
        assert_eq!(staff.hourly_rate, Decimal::new(1350, 0));
        assert_eq!(staff.position, "kitchen");
    }
}
