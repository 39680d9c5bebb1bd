use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::BedStatus;
use super::patient::Patient;

/// Tenant root. Every unit, user and (transitively) clinical record hangs
/// off a hospital.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A ward/department inside a hospital. `max_beds` is declarative capacity;
/// nothing enforces it at admission time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub name: String,
    pub code: String,
    pub color: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub max_beds: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub number: String,
    pub name: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub status: BedStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A bed together with the patient currently occupying it, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedWithPatient {
    #[serde(flatten)]
    pub bed: Bed,
    pub patient: Option<Patient>,
}

/// Occupancy breakdown for a unit's bed grid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedOccupancy {
    pub total: u32,
    pub occupied: u32,
    pub available: u32,
    pub maintenance: u32,
    pub blocked: u32,
}

impl BedOccupancy {
    /// Tally beds by status. Exhaustive on `BedStatus` so a new status must
    /// be accounted for here.
    pub fn from_beds(beds: &[BedWithPatient]) -> Self {
        let mut occupancy = BedOccupancy::default();
        for entry in beds {
            occupancy.total += 1;
            match entry.bed.status {
                BedStatus::Available => occupancy.available += 1,
                BedStatus::Occupied => occupancy.occupied += 1,
                BedStatus::Maintenance => occupancy.maintenance += 1,
                BedStatus::Blocked => occupancy.blocked += 1,
            }
        }
        occupancy
    }
}

/// Read model for the dashboard: a unit with its hospital, bed grid and
/// occupancy stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitWithBeds {
    #[serde(flatten)]
    pub unit: Unit,
    pub hospital: Hospital,
    pub beds: Vec<BedWithPatient>,
    pub occupancy: BedOccupancy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBedStatusRequest {
    pub status: BedStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bed(status: BedStatus) -> BedWithPatient {
        BedWithPatient {
            bed: Bed {
                id: Uuid::new_v4(),
                unit_id: Uuid::new_v4(),
                number: "1".to_string(),
                name: Some("Cama 1".to_string()),
                position: 1,
                is_active: true,
                status,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            patient: None,
        }
    }

    #[test]
    fn occupancy_counts_every_status() {
        let beds = vec![
            bed(BedStatus::Available),
            bed(BedStatus::Available),
            bed(BedStatus::Occupied),
            bed(BedStatus::Maintenance),
            bed(BedStatus::Blocked),
        ];

        let occupancy = BedOccupancy::from_beds(&beds);
        assert_eq!(occupancy.total, 5);
        assert_eq!(occupancy.available, 2);
        assert_eq!(occupancy.occupied, 1);
        assert_eq!(occupancy.maintenance, 1);
        assert_eq!(occupancy.blocked, 1);
    }
}
