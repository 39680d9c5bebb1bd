use serde::{Deserialize, Serialize};

/// Role of a hospital user. Access to units is granted per-role through
/// explicit `user_unit_access` rows, not inferred here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Medico,
    Residente,
    Enfermero,
    Viewer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "bed_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BedStatus {
    Available,
    Occupied,
    Maintenance,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "gender", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Masculino,
    Femenino,
    Otro,
}

/// Hospitalization status of a patient. `Alta` and `Fallecido` close the
/// episode; the record itself is never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "patient_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatientStatus {
    Hospitalizado,
    Uci,
    Ucm,
    Hosdom,
    Alta,
    Fallecido,
}

impl PatientStatus {
    /// Whether the hospitalization episode is closed.
    pub fn is_terminal(self) -> bool {
        matches!(self, PatientStatus::Alta | PatientStatus::Fallecido)
    }

    /// Badge color classes used by the dashboard, one per status.
    pub fn badge_color(self) -> &'static str {
        match self {
            PatientStatus::Hospitalizado => "bg-blue-100 text-blue-800",
            PatientStatus::Uci => "bg-red-100 text-red-800",
            PatientStatus::Ucm => "bg-orange-100 text-orange-800",
            PatientStatus::Hosdom => "bg-green-100 text-green-800",
            PatientStatus::Alta => "bg-gray-100 text-gray-800",
            PatientStatus::Fallecido => "bg-black text-white",
        }
    }
}

/// Body system a treatment plan targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "medical_system", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MedicalSystem {
    Cardiovascular,
    Respiratorio,
    Neurologico,
    Digestivo,
    Genitourinario,
    Hematologico,
    Endocrino,
    Infeccioso,
    Psiquiatrico,
    Dermatologico,
    Oftalmologico,
    Otorrinolaringologico,
    Traumatologico,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "plan_priority", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanPriority {
    Alta,
    Normal,
    Baja,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "task_priority", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Urgente,
    Alta,
    Normal,
    Baja,
}

impl TaskPriority {
    /// Sort rank, most urgent first. Exhaustive so a new priority forces a
    /// decision here.
    pub fn rank(self) -> u8 {
        match self {
            TaskPriority::Urgente => 0,
            TaskPriority::Alta => 1,
            TaskPriority::Normal => 2,
            TaskPriority::Baja => 3,
        }
    }

    pub fn badge_color(self) -> &'static str {
        match self {
            TaskPriority::Urgente => "bg-red-100 text-red-800",
            TaskPriority::Alta => "bg-orange-100 text-orange-800",
            TaskPriority::Normal => "bg-blue-100 text-blue-800",
            TaskPriority::Baja => "bg-gray-100 text-gray-800",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pendiente,
    EnProgreso,
    Completada,
    Cancelada,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "lab_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LabType {
    Hemograma,
    QuimicaSanguinea,
    GasesArteriales,
    Electrolitos,
    Coagulacion,
    Orina,
    Cultivos,
    Imagenes,
    Otros,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_names_are_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::EnProgreso).unwrap(),
            "\"EN_PROGRESO\""
        );
        assert_eq!(
            serde_json::to_string(&LabType::QuimicaSanguinea).unwrap(),
            "\"QUIMICA_SANGUINEA\""
        );
        assert_eq!(
            serde_json::to_string(&PatientStatus::Hosdom).unwrap(),
            "\"HOSDOM\""
        );
    }

    #[test]
    fn task_priorities_sort_urgent_first() {
        let mut priorities = vec![
            TaskPriority::Baja,
            TaskPriority::Urgente,
            TaskPriority::Normal,
            TaskPriority::Alta,
        ];
        priorities.sort_by_key(|p| p.rank());
        assert_eq!(priorities[0], TaskPriority::Urgente);
        assert_eq!(priorities[3], TaskPriority::Baja);
    }

    #[test]
    fn terminal_statuses_close_the_episode() {
        assert!(PatientStatus::Alta.is_terminal());
        assert!(PatientStatus::Fallecido.is_terminal());
        assert!(!PatientStatus::Uci.is_terminal());
        assert!(!PatientStatus::Hospitalizado.is_terminal());
    }
}
