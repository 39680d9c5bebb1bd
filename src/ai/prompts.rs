//! Prompt templates and formatting helpers for clinical text generation.
//!
//! The templates are fixed Spanish instruction texts for a Chilean hospital
//! context; the helper functions render patient data into them with explicit
//! "No especificado" / "No registrada" placeholders for missing fields, so a
//! sparse snapshot never fails to render.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// System-role preamble sent with every evolution-generation request.
pub const SYSTEM_PREAMBLE: &str = "Eres un médico especialista experimentado que trabaja en Chile. Generas evoluciones médicas profesionales, precisas y completas usando terminología médica apropiada.";

/// Base prompt for full SOAP evolutions.
pub const EVOLUTION_GENERATION: &str = "\
Eres un médico especialista en medicina interna trabajando en un hospital chileno.
Tu tarea es generar una evolución médica profesional y completa basada en los datos del paciente.

CONTEXTO MÉDICO CHILENO:
- Usa terminología médica estándar en español
- Incluye unidades métricas (mmHg, °C, etc.)
- Sigue el formato SOAP (Subjetivo, Objetivo, Análisis, Plan)
- Mantén un lenguaje profesional pero claro

ESTRUCTURA REQUERIDA:
1. SUBJETIVO: Síntomas y quejas del paciente en sus propias palabras
2. OBJETIVO: Signos vitales, examen físico, resultados de laboratorio
3. ANÁLISIS: Evaluación clínica, diagnósticos diferenciales, evolución
4. PLAN: Tratamiento, monitorización, seguimiento por sistemas

FORMATO DE RESPUESTA:
Genera una evolución médica completa, profesional y estructurada.";

/// Prompt for interpreting laboratory panels.
pub const LAB_ANALYSIS: &str = "\
Eres un médico especialista analizando resultados de laboratorio en un hospital chileno.
Proporciona una interpretación clínica clara y recomendaciones apropiadas.

INSTRUCCIONES:
- Identifica valores anormales y su significado clínico
- Sugiere estudios complementarios si es necesario
- Relaciona los hallazgos con el contexto clínico del paciente
- Usa terminología médica estándar en español
- Incluye valores de referencia cuando sea relevante

FORMATO:
- Hallazgos principales
- Interpretación clínica
- Recomendaciones";

/// Prompt for per-body-system care plans.
pub const SYSTEM_PLANS: &str = "\
Eres un médico creando planes terapéuticos por sistemas para un paciente hospitalizado.
Genera planes específicos, realizables y basados en evidencia.

SISTEMAS A CONSIDERAR:
- Cardiovascular
- Respiratorio
- Neurológico
- Digestivo
- Genitourinario
- Hematológico
- Endocrino
- Infeccioso

FORMATO PARA CADA SISTEMA:
- Evaluación actual
- Objetivos terapéuticos
- Intervenciones específicas
- Monitorización requerida
- Criterios de mejoría/deterioro";

/// Prompt for shift-handoff summaries.
pub const SHIFT_SUMMARY: &str = "\
Eres un médico preparando la entrega de turno en una unidad hospitalaria chilena.
Crea un resumen conciso pero completo para el médico entrante.

INCLUIR:
- Pacientes críticos o inestables
- Cambios significativos en las últimas horas
- Procedimientos realizados o pendientes
- Alertas y precauciones especiales
- Tareas urgentes para el próximo turno

FORMATO:
- Resumen ejecutivo
- Pacientes por prioridad
- Tareas pendientes críticas
- Observaciones especiales";

/// Prompt for short free-form progress notes.
pub const QUICK_NOTE: &str = "\
Genera una nota de evolución breve y concisa para documentación rápida.
Mantén el formato profesional pero conciso.

INCLUIR:
- Estado general del paciente
- Cambios desde la última evaluación
- Intervenciones realizadas
- Plan inmediato

FORMATO: Nota breve, profesional, máximo 200 palabras.";

/// Prompt for vital-sign interpretation.
pub const VITAL_SIGNS_INTERPRETATION: &str = "\
Analiza los signos vitales proporcionados y proporciona una interpretación clínica.

CONSIDERAR:
- Valores normales para la edad del paciente
- Tendencias y cambios
- Correlación con el cuadro clínico
- Necesidad de intervención inmediata

FORMATO:
- Interpretación de cada signo vital
- Evaluación global
- Recomendaciones de manejo";

/// Prompt for medication review.
pub const MEDICATION_PLAN: &str = "\
Eres un médico revisando y optimizando el plan farmacológico de un paciente.
Considera interacciones, contraindicaciones y eficacia.

INCLUIR:
- Medicamentos actuales y su justificación
- Posibles interacciones
- Ajustes de dosis necesarios
- Monitorización requerida
- Medicamentos a suspender o agregar

FORMATO:
- Lista de medicamentos con dosis y frecuencia
- Justificación clínica
- Precauciones y monitorización";

/// Vital signs as captured in the evolution form. Caller-supplied strings,
/// deliberately unvalidated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VitalSigns {
    pub bp: Option<String>,
    pub hr: Option<String>,
    pub rr: Option<String>,
    pub temp: Option<String>,
    pub sat: Option<String>,
}

/// Structured snapshot of a patient's current state, as submitted by the
/// evolution form. Every field is optional; missing values surface inside
/// the rendered prompt as "No especificado", never as an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientSnapshot {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub diagnosis: Option<String>,
    pub vitals: VitalSigns,
    pub subjective: Option<String>,
    pub objective: Option<String>,
    pub labs: Option<String>,
    pub medications: Option<String>,
    pub notes: Option<String>,
}

/// Patient context prepended to a base template by [`contextual_prompt`].
#[derive(Debug, Clone, Default)]
pub struct PatientContext {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub diagnosis: Option<String>,
    pub unit: Option<String>,
    pub days_hospitalized: Option<u32>,
}

fn or_fallback<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback,
    }
}

/// Render the full evolution-generation instruction for one snapshot: data
/// enumerated verbatim, seven numbered instructions, and the four required
/// section headers in fixed order.
pub fn evolution_prompt(snapshot: &PatientSnapshot) -> String {
    format!(
        "\
Eres un médico especialista en medicina interna trabajando en Chile. Genera una evolución médica profesional en formato SOAP basada en los siguientes datos del paciente:

DATOS DEL PACIENTE:
- Nombre: {name}
- Edad: {age} años
- Sexo: {gender}
- Diagnóstico: {diagnosis}

SIGNOS VITALES:
- Presión Arterial: {bp}
- Frecuencia Cardíaca: {hr}
- Frecuencia Respiratoria: {rr}
- Temperatura: {temp}
- Saturación O2: {sat}

DATOS SUBJETIVOS:
{subjective}

DATOS OBJETIVOS:
{objective}

LABORATORIOS E IMÁGENES:
{labs}

MEDICAMENTOS:
{medications}

NOTAS ADICIONALES:
{notes}

INSTRUCCIONES:
1. Genera una evolución médica completa en formato SOAP (Subjetivo, Objetivo, Análisis, Plan)
2. Usa terminología médica chilena apropiada
3. Incluye interpretación de signos vitales y laboratorios
4. Proporciona un plan de manejo específico
5. Mantén un tono profesional y clínico
6. Si faltan datos importantes, menciona la necesidad de evaluación adicional
7. Incluye recomendaciones de seguimiento

Formato requerido:
SUBJETIVO:
[Síntomas y quejas del paciente]

OBJETIVO:
[Hallazgos del examen físico y signos vitales]

ANÁLISIS:
[Interpretación clínica y diagnóstico diferencial]

PLAN:
[Plan de tratamiento y seguimiento]",
        name = or_fallback(&snapshot.name, "No especificado"),
        age = or_fallback(&snapshot.age, "No especificada"),
        gender = or_fallback(&snapshot.gender, "No especificado"),
        diagnosis = or_fallback(&snapshot.diagnosis, "No especificado"),
        bp = or_fallback(&snapshot.vitals.bp, "No registrada"),
        hr = or_fallback(&snapshot.vitals.hr, "No registrada"),
        rr = or_fallback(&snapshot.vitals.rr, "No registrada"),
        temp = or_fallback(&snapshot.vitals.temp, "No registrada"),
        sat = or_fallback(&snapshot.vitals.sat, "No registrada"),
        subjective = or_fallback(&snapshot.subjective, "No especificado"),
        objective = or_fallback(&snapshot.objective, "No especificado"),
        labs = or_fallback(&snapshot.labs, "No especificado"),
        medications = or_fallback(&snapshot.medications, "No especificado"),
        notes = or_fallback(&snapshot.notes, "No especificado"),
    )
}

/// Prepend a patient-context block to any base template.
pub fn contextual_prompt(base: &str, context: &PatientContext) -> String {
    let age = context
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| "No especificada".to_string());
    let days = context
        .days_hospitalized
        .map(|d| d.to_string())
        .unwrap_or_else(|| "No especificado".to_string());

    format!(
        "\
CONTEXTO DEL PACIENTE:
- Nombre: {name}
- Edad: {age}
- Género: {gender}
- Diagnóstico principal: {diagnosis}
- Unidad: {unit}
- Días hospitalizado: {days}

{base}",
        name = or_fallback(&context.name, "Paciente"),
        age = age,
        gender = or_fallback(&context.gender, "No especificado"),
        diagnosis = or_fallback(&context.diagnosis, "No especificado"),
        unit = or_fallback(&context.unit, "No especificada"),
        days = days,
        base = base,
    )
}

/// One-line vital-sign summary in the format the dashboard shows.
pub fn format_vital_signs(vitals: &VitalSigns) -> String {
    format!(
        "PA: {bp} mmHg, FC: {hr} lpm, FR: {rr} rpm, T°: {temp}°C, SatO2: {sat}%",
        bp = or_fallback(&vitals.bp, "No registrada"),
        hr = or_fallback(&vitals.hr, "No registrada"),
        rr = or_fallback(&vitals.rr, "No registrada"),
        temp = or_fallback(&vitals.temp, "No registrada"),
        sat = or_fallback(&vitals.sat, "No registrada"),
    )
}

const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Localized long-form date, e.g. "15 de junio de 2024, 14:30".
pub fn format_medical_date(date: DateTime<Utc>) -> String {
    let month = SPANISH_MONTHS[date.month0() as usize];
    format!(
        "{} de {} de {}, {:02}:{:02}",
        date.day(),
        month,
        date.year(),
        date.hour(),
        date.minute()
    )
}

/// Whole years between `birth_date` and `reference`, decremented by one when
/// the birthday has not yet occurred in the reference year.
pub fn age_from_birth_date(birth_date: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - birth_date.year();
    if (reference.month(), reference.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_renders_fallbacks() {
        let prompt = evolution_prompt(&PatientSnapshot::default());

        assert!(prompt.contains("- Nombre: No especificado"));
        assert!(prompt.contains("- Edad: No especificada años"));
        assert!(prompt.contains("- Presión Arterial: No registrada"));
        assert!(prompt.contains("- Saturación O2: No registrada"));
        assert!(prompt.contains("DATOS SUBJETIVOS:\nNo especificado"));
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let snapshot = PatientSnapshot {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        let prompt = evolution_prompt(&snapshot);
        assert!(prompt.contains("- Nombre: No especificado"));
    }

    #[test]
    fn populated_snapshot_is_enumerated_verbatim() {
        let snapshot = PatientSnapshot {
            name: Some("Juan Pérez".to_string()),
            age: Some("45".to_string()),
            diagnosis: Some("Neumonía".to_string()),
            vitals: VitalSigns {
                bp: Some("120/80".to_string()),
                hr: Some("88".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let prompt = evolution_prompt(&snapshot);
        assert!(prompt.contains("- Nombre: Juan Pérez"));
        assert!(prompt.contains("- Edad: 45 años"));
        assert!(prompt.contains("- Diagnóstico: Neumonía"));
        assert!(prompt.contains("- Presión Arterial: 120/80"));
    }

    #[test]
    fn prompt_lists_section_headers_in_order() {
        let prompt = evolution_prompt(&PatientSnapshot::default());
        let subjetivo = prompt.find("SUBJETIVO:").unwrap();
        let objetivo = prompt.find("OBJETIVO:").unwrap();
        let analisis = prompt.find("ANÁLISIS:").unwrap();
        let plan = prompt.find("PLAN:").unwrap();
        assert!(subjetivo < objetivo && objetivo < analisis && analisis < plan);
    }

    #[test]
    fn contextual_prompt_prepends_context_block() {
        let context = PatientContext {
            name: Some("María Elena".to_string()),
            age: Some(49),
            unit: Some("UCI".to_string()),
            ..Default::default()
        };

        let prompt = contextual_prompt(LAB_ANALYSIS, &context);
        assert!(prompt.starts_with("CONTEXTO DEL PACIENTE:"));
        assert!(prompt.contains("- Nombre: María Elena"));
        assert!(prompt.contains("- Edad: 49"));
        assert!(prompt.contains("- Unidad: UCI"));
        assert!(prompt.contains("- Días hospitalizado: No especificado"));
        assert!(prompt.ends_with(LAB_ANALYSIS));
    }

    #[test]
    fn age_respects_birthday_boundary() {
        let birth = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();

        let before = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        assert_eq!(age_from_birth_date(birth, before), 33);

        let on = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(age_from_birth_date(birth, on), 34);

        let after = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(age_from_birth_date(birth, after), 34);
    }

    #[test]
    fn vital_signs_line_uses_registered_fallback() {
        let line = format_vital_signs(&VitalSigns::default());
        assert_eq!(
            line,
            "PA: No registrada mmHg, FC: No registrada lpm, FR: No registrada rpm, T°: No registrada°C, SatO2: No registrada%"
        );
    }

    #[test]
    fn medical_date_is_spanish_long_form() {
        let date = DateTime::parse_from_rfc3339("2024-06-15T14:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_medical_date(date), "15 de junio de 2024, 14:30");
    }
}
