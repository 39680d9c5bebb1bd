use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    Bed, BedOccupancy, BedStatus, BedWithPatient, CreateEvolutionRequest, CreateLaboratoryRequest,
    CreatePatientRequest, CreateShiftRequest, CreateTaskRequest, Diagnosis, Evolution,
    EvolutionWithPlans, Hospital, Laboratory, Patient, PatientFilters, PatientStatus,
    PatientWithRelations, Shift, SystemPlan, Task, TaskStatus, Unit, UnitWithBeds, User,
};

/// All persistence behind one handle. Constructed once in `main` around a
/// bounded pool and shared via `Arc` through the app state; no globals.
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- units and beds ---

    /// Active units with their hospital, bed grid, current occupants and
    /// occupancy tallies, as the dashboard consumes them.
    pub async fn list_units_with_beds(&self) -> Result<Vec<UnitWithBeds>, ApiError> {
        let units =
            sqlx::query_as::<_, Unit>("SELECT * FROM units WHERE is_active ORDER BY code")
                .fetch_all(&self.pool)
                .await?;

        let mut out = Vec::with_capacity(units.len());
        for unit in units {
            let hospital = sqlx::query_as::<_, Hospital>("SELECT * FROM hospitals WHERE id = $1")
                .bind(unit.hospital_id)
                .fetch_one(&self.pool)
                .await?;

            let beds = sqlx::query_as::<_, Bed>(
                "SELECT * FROM beds WHERE unit_id = $1 AND is_active ORDER BY position",
            )
            .bind(unit.id)
            .fetch_all(&self.pool)
            .await?;

            let mut entries = Vec::with_capacity(beds.len());
            for bed in beds {
                let patient = sqlx::query_as::<_, Patient>(
                    "SELECT * FROM patients
                     WHERE bed_id = $1 AND discharge_date IS NULL
                     ORDER BY admission_date DESC LIMIT 1",
                )
                .bind(bed.id)
                .fetch_optional(&self.pool)
                .await?;

                entries.push(BedWithPatient { bed, patient });
            }

            let occupancy = BedOccupancy::from_beds(&entries);
            out.push(UnitWithBeds {
                unit,
                hospital,
                beds: entries,
                occupancy,
            });
        }

        Ok(out)
    }

    pub async fn update_bed_status(
        &self,
        id: Uuid,
        status: BedStatus,
    ) -> Result<Option<Bed>, ApiError> {
        let bed = sqlx::query_as::<_, Bed>(
            "UPDATE beds SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bed)
    }

    // --- patients ---

    /// Admission: insert the patient and its initial diagnoses and flip the
    /// bed to Occupied, all in one transaction. The bed row is locked first
    /// so two concurrent admissions cannot share a bed.
    pub async fn admit_patient(&self, req: CreatePatientRequest) -> Result<Patient, ApiError> {
        let mut tx = self.pool.begin().await?;

        let bed = sqlx::query_as::<_, Bed>("SELECT * FROM beds WHERE id = $1 FOR UPDATE")
            .bind(req.bed_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(ApiError::NotFound("bed"))?;

        if bed.status != BedStatus::Available {
            return Err(ApiError::BadRequest(format!(
                "bed {} is not available",
                bed.number
            )));
        }

        let patient = sqlx::query_as::<_, Patient>(
            "INSERT INTO patients
                 (bed_id, rut, name, last_name, birth_date, gender,
                  phone, address, emergency, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(req.bed_id)
        .bind(&req.rut)
        .bind(&req.name)
        .bind(&req.last_name)
        .bind(req.birth_date)
        .bind(req.gender)
        .bind(&req.phone)
        .bind(&req.address)
        .bind(&req.emergency)
        .bind(req.status)
        .fetch_one(&mut *tx)
        .await?;

        for diagnosis in &req.diagnoses {
            sqlx::query(
                "INSERT INTO diagnoses (patient_id, code, description, is_primary)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(patient.id)
            .bind(&diagnosis.code)
            .bind(&diagnosis.description)
            .bind(diagnosis.is_primary)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE beds SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(BedStatus::Occupied)
            .bind(req.bed_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(patient)
    }

    pub async fn list_patients(&self, filters: &PatientFilters) -> Result<Vec<Patient>, ApiError> {
        let patients = sqlx::query_as::<_, Patient>(
            "SELECT p.* FROM patients p
             JOIN beds b ON b.id = p.bed_id
             WHERE ($1::uuid IS NULL OR b.unit_id = $1)
               AND ($2::patient_status IS NULL OR p.status = $2)
             ORDER BY p.admission_date DESC",
        )
        .bind(filters.unit_id)
        .bind(filters.status)
        .fetch_all(&self.pool)
        .await?;

        Ok(patients)
    }

    pub async fn get_patient_with_relations(
        &self,
        id: Uuid,
    ) -> Result<Option<PatientWithRelations>, ApiError> {
        let patient = sqlx::query_as::<_, Patient>("SELECT * FROM patients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(patient) = patient else {
            return Ok(None);
        };

        let bed = sqlx::query_as::<_, Bed>("SELECT * FROM beds WHERE id = $1")
            .bind(patient.bed_id)
            .fetch_one(&self.pool)
            .await?;

        let unit = sqlx::query_as::<_, Unit>("SELECT * FROM units WHERE id = $1")
            .bind(bed.unit_id)
            .fetch_one(&self.pool)
            .await?;

        let diagnoses = sqlx::query_as::<_, Diagnosis>(
            "SELECT * FROM diagnoses
             WHERE patient_id = $1 AND is_active
             ORDER BY is_primary DESC, created_at",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let evolutions = sqlx::query_as::<_, Evolution>(
            "SELECT * FROM evolutions WHERE patient_id = $1 ORDER BY date DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let tasks = self.list_tasks(id).await?;

        let labs = sqlx::query_as::<_, Laboratory>(
            "SELECT * FROM laboratories WHERE patient_id = $1 ORDER BY date DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(PatientWithRelations {
            patient,
            bed,
            unit,
            diagnoses,
            evolutions,
            tasks,
            labs,
        }))
    }

    /// Status transition. Discharge and death stamp `discharge_date` and
    /// free the bed in the same transaction; the record itself stays.
    pub async fn update_patient_status(
        &self,
        id: Uuid,
        status: PatientStatus,
    ) -> Result<Option<Patient>, ApiError> {
        let mut tx = self.pool.begin().await?;

        let existing =
            sqlx::query_as::<_, Patient>("SELECT * FROM patients WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let patient = if status.is_terminal() {
            let patient = sqlx::query_as::<_, Patient>(
                "UPDATE patients
                 SET status = $1, discharge_date = NOW(), updated_at = NOW()
                 WHERE id = $2 RETURNING *",
            )
            .bind(status)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query("UPDATE beds SET status = $1, updated_at = NOW() WHERE id = $2")
                .bind(BedStatus::Available)
                .bind(existing.bed_id)
                .execute(&mut *tx)
                .await?;

            patient
        } else {
            sqlx::query_as::<_, Patient>(
                "UPDATE patients SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
            )
            .bind(status)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?
        };

        tx.commit().await?;
        Ok(Some(patient))
    }

    // --- evolutions ---

    pub async fn create_evolution(
        &self,
        patient_id: Uuid,
        req: CreateEvolutionRequest,
    ) -> Result<EvolutionWithPlans, ApiError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT 1 FROM patients WHERE id = $1")
            .bind(patient_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(ApiError::NotFound("patient"))?;

        let evolution = sqlx::query_as::<_, Evolution>(
            "INSERT INTO evolutions
                 (patient_id, created_by, subjective, objective, assessment,
                  plan, full_text, is_generated)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(patient_id)
        .bind(req.created_by)
        .bind(&req.subjective)
        .bind(&req.objective)
        .bind(&req.assessment)
        .bind(&req.plan)
        .bind(&req.full_text)
        .bind(req.is_generated)
        .fetch_one(&mut *tx)
        .await?;

        let mut system_plans = Vec::with_capacity(req.system_plans.len());
        for plan in &req.system_plans {
            let created = sqlx::query_as::<_, SystemPlan>(
                "INSERT INTO system_plans (evolution_id, system, description, priority)
                 VALUES ($1, $2, $3, $4)
                 RETURNING *",
            )
            .bind(evolution.id)
            .bind(plan.system)
            .bind(&plan.description)
            .bind(plan.priority)
            .fetch_one(&mut *tx)
            .await?;
            system_plans.push(created);
        }

        tx.commit().await?;
        Ok(EvolutionWithPlans {
            evolution,
            system_plans,
        })
    }

    pub async fn list_evolutions(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<EvolutionWithPlans>, ApiError> {
        let evolutions = sqlx::query_as::<_, Evolution>(
            "SELECT * FROM evolutions WHERE patient_id = $1 ORDER BY date DESC",
        )
        .bind(patient_id)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(evolutions.len());
        for evolution in evolutions {
            let system_plans = sqlx::query_as::<_, SystemPlan>(
                "SELECT * FROM system_plans WHERE evolution_id = $1 ORDER BY created_at",
            )
            .bind(evolution.id)
            .fetch_all(&self.pool)
            .await?;

            out.push(EvolutionWithPlans {
                evolution,
                system_plans,
            });
        }

        Ok(out)
    }

    // --- tasks ---

    pub async fn create_task(&self, req: CreateTaskRequest) -> Result<Task, ApiError> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks
                 (patient_id, created_by, assigned_to, title, description,
                  priority, due_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(req.patient_id)
        .bind(req.created_by)
        .bind(req.assigned_to)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.priority)
        .bind(req.due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    /// Tasks for a patient, most urgent first, earlier due dates breaking
    /// ties within a priority.
    pub async fn list_tasks(&self, patient_id: Uuid) -> Result<Vec<Task>, ApiError> {
        let mut tasks =
            sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE patient_id = $1")
                .bind(patient_id)
                .fetch_all(&self.pool)
                .await?;

        tasks.sort_by_key(|t| (t.priority.rank(), t.due_date));
        Ok(tasks)
    }

    /// Status transition; moving to Completada stamps `completed_at`.
    pub async fn update_task_status(
        &self,
        id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Task>, ApiError> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks
             SET status = $1,
                 completed_at = CASE WHEN $1 = 'COMPLETADA'::task_status
                                     THEN NOW() ELSE completed_at END,
                 updated_at = NOW()
             WHERE id = $2
             RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    // --- laboratories ---

    pub async fn create_laboratory(
        &self,
        patient_id: Uuid,
        req: CreateLaboratoryRequest,
    ) -> Result<Laboratory, ApiError> {
        let lab_type = req.results.lab_type();

        let lab = sqlx::query_as::<_, Laboratory>(
            "INSERT INTO laboratories (patient_id, lab_type, date, results, notes, is_urgent)
             VALUES ($1, $2, COALESCE($3, NOW()), $4, $5, $6)
             RETURNING *",
        )
        .bind(patient_id)
        .bind(lab_type)
        .bind(req.date)
        .bind(Json(&req.results))
        .bind(&req.notes)
        .bind(req.is_urgent)
        .fetch_one(&self.pool)
        .await?;

        Ok(lab)
    }

    pub async fn list_laboratories(&self, patient_id: Uuid) -> Result<Vec<Laboratory>, ApiError> {
        let labs = sqlx::query_as::<_, Laboratory>(
            "SELECT * FROM laboratories WHERE patient_id = $1 ORDER BY date DESC",
        )
        .bind(patient_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(labs)
    }

    // --- users and shifts ---

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let users =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE is_active ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(users)
    }

    pub async fn create_shift(&self, req: CreateShiftRequest) -> Result<Shift, ApiError> {
        let shift = sqlx::query_as::<_, Shift>(
            "INSERT INTO shifts (unit_id, doctor_id, date, start_time, end_time, summary, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(req.unit_id)
        .bind(req.doctor_id)
        .bind(req.date)
        .bind(req.start_time)
        .bind(req.end_time)
        .bind(&req.summary)
        .bind(&req.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(shift)
    }

    pub async fn list_shifts(&self, unit_id: Uuid) -> Result<Vec<Shift>, ApiError> {
        let shifts = sqlx::query_as::<_, Shift>(
            "SELECT * FROM shifts WHERE unit_id = $1 ORDER BY date DESC",
        )
        .bind(unit_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(shifts)
    }
}
