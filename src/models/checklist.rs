//! Startup checklists ("Puesta en Marcha") for the two seeder lines.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::FieldErrors;

/// Service type recorded on every startup checklist report.
pub const STARTUP_SERVICE_TYPE: &str = "Puesta en Marcha";

/// Machine line with its own checklist template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MachineModel {
    Drillor,
    Plantor,
}

impl MachineModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drillor => "drillor",
            Self::Plantor => "plantor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "drillor" => Some(Self::Drillor),
            "plantor" => Some(Self::Plantor),
            _ => None,
        }
    }

    /// Template for a free-text machine model: anything mentioning "drill"
    /// is a Drillor, everything else a Plantor.
    pub fn from_machine_text(text: &str) -> Self {
        if text.to_lowercase().contains("drill") {
            Self::Drillor
        } else {
            Self::Plantor
        }
    }

    pub fn template(&self) -> ChecklistTemplate {
        match self {
            Self::Drillor => ChecklistTemplate::build(
                *self,
                "Puesta en Marcha - Sembradora Drillor",
                DRILLOR_ITEMS,
            ),
            Self::Plantor => ChecklistTemplate::build(
                *self,
                "Puesta en Marcha - Sembradora Plantor",
                PLANTOR_ITEMS,
            ),
        }
    }
}

impl std::fmt::Display for MachineModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Template chosen for the machine model text of an assignment.
pub fn template_for_machine(model_text: &str) -> ChecklistTemplate {
    MachineModel::from_machine_text(model_text).template()
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChecklistItem {
    pub id: String,
    pub category: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChecklistTemplate {
    pub model: MachineModel,
    pub title: String,
    pub items: Vec<ChecklistItem>,
}

impl ChecklistTemplate {
    fn build(model: MachineModel, title: &str, rows: &[(&str, &str, &str)]) -> Self {
        Self {
            model,
            title: title.to_string(),
            items: rows
                .iter()
                .map(|&(category, id, label)| ChecklistItem {
                    id: id.to_string(),
                    category: category.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }

    pub fn has_item(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }
}

/// Answer to one checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistState {
    Ok,
    NoAplica,
    Observacion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChecklistResponse {
    pub state: ChecklistState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Submitted startup checklist.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StartupChecklistInput {
    pub client_name: String,
    pub machine_serial: String,
    pub machine_model: String,
    #[serde(default)]
    pub responses: BTreeMap<String, ChecklistResponse>,
    #[serde(rename = "type", default = "default_service_type")]
    pub service_type: String,
}

fn default_service_type() -> String {
    STARTUP_SERVICE_TYPE.to_string()
}

/// A [`StartupChecklistInput`] that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidChecklist {
    pub client_name: String,
    pub machine_serial: String,
    pub machine_model: MachineModel,
    pub responses: BTreeMap<String, ChecklistResponse>,
}

impl StartupChecklistInput {
    pub fn validate(&self) -> Result<ValidChecklist, FieldErrors> {
        let mut errors = FieldErrors::default();

        errors.min_chars(
            "client_name",
            &self.client_name,
            3,
            "El nombre del cliente es obligatorio.",
        );
        errors.min_chars(
            "machine_serial",
            &self.machine_serial,
            3,
            "El número de serie es obligatorio.",
        );

        let model = MachineModel::parse(&self.machine_model);
        if model.is_none() {
            errors.add(
                "machine_model",
                "Debe seleccionar un modelo válido (drillor o plantor).",
            );
        }
        if self.service_type != STARTUP_SERVICE_TYPE {
            errors.add("type", "Tipo de reporte no soportado.");
        }

        if self.responses.is_empty() {
            errors.add(
                "responses",
                "El checklist no puede estar vacío. Por favor, complete al menos un punto.",
            );
        } else if let Some(model) = model {
            let template = model.template();
            for id in self.responses.keys() {
                if !template.has_item(id) {
                    errors.add("responses", format!("Punto desconocido en el checklist: {}", id));
                }
            }
        }

        errors.finish()?;

        match model {
            Some(machine_model) => Ok(ValidChecklist {
                client_name: self.client_name.trim().to_string(),
                machine_serial: self.machine_serial.trim().to_string(),
                machine_model,
                responses: self
                    .responses
                    .iter()
                    .map(|(id, response)| {
                        let note = response
                            .note
                            .as_deref()
                            .map(str::trim)
                            .filter(|n| !n.is_empty())
                            .map(str::to_string);
                        (
                            id.clone(),
                            ChecklistResponse {
                                state: response.state,
                                note,
                            },
                        )
                    })
                    .collect(),
            }),
            None => {
                let mut errors = FieldErrors::default();
                errors.add("machine_model", "Modelo de máquina inválido.");
                Err(errors)
            }
        }
    }
}

// (category, id, label)
#[rustfmt::skip]
const DRILLOR_ITEMS: &[(&str, &str, &str)] = &[
    ("1. Verificación Inicial", "1.1", "Cumplimiento del certificado de recepción."),
    ("1. Verificación Inicial", "1.2", "Cumplimiento del certificado de preentrega."),
    ("3. Introducción", "3.1", "Muestra de manual y política de garantía al cliente."),
    ("4. Tractor", "4.1", "Verificación de las especificaciones técnicas del tractor vs. máquina."),
    ("4. Tractor", "4.2", "Colocación del monitor y cableado en cabina (Conectar siempre directo a batería)."),
    ("4. Tractor", "4.3", "Chequear diametro perno enganche tractor con puntera de enganche."),
    ("4. Tractor", "4.5", "Vinculación y medición de caudales hidráulicos (Chasis, Alas, Turbinas, Drenaje)."),
    ("4. Tractor", "4.7", "Medición 540 RPM en toma de fuerza del tractor."),
    ("4. Tractor", "4.9", "Colocación y regulación del radar (35° inclinación, 80 cm suelo)."),
    ("5. Pasa de Transporte a Trabajo", "5.1", "Capacitar al cliente para el paso de transporte a trabajo y viceversa."),
    ("6. Riendas Roscadas", "6.1", "Regulación de riendas chasis central (Largo 925)."),
    ("6. Riendas Roscadas", "6.3", "Regulación de riendas del carro portaherramientas."),
    ("6. Riendas Roscadas", "6.4", "Alineación de alas con respecto al chasis central (Largo 1275)."),
    ("6. Riendas Roscadas", "6.5", "Regular tope trasero roscado del balancín ruedas alas (dejar 15mm libres)."),
    ("7. Tren de Siembra", "7.1", "Alineación de cuchillas de corte."),
    ("7. Tren de Siembra", "7.2", "Regulación de profundidad y presión cuchillas (5 hilos de rosca)."),
    ("7. Tren de Siembra", "7.6", "Regulación de profundidad de siembra."),
    ("7. Tren de Siembra", "7.7", "Regulación de presión, alineación y posición de ruedas tapadoras."),
    ("7. Tren de Siembra", "7.8", "Posición de trabajo de las ruedas niveladoras."),
    ("8. Dosificador Monograno", "8.1", "Colocación de placas, enrasadores y expulsores correspondientes."),
    ("8. Dosificador Monograno", "8.2", "Regulación de las guillotinas de entrada."),
    ("9. Sensores", "9.1", "Regulación de sensores de levante 1 (Discos apoyando, sensando Activo)."),
    ("9. Sensores", "9.2", "Regulación de sensores de levante 2 (Recorrer unos metros con máquina clavada, sensando Activo)."),
    ("9. Sensores", "9.3", "Verificación de posición correcta de sensores de velocidad y RPM."),
    ("10. Configuración de Tolva", "10.2", "Solo semilla: Se deben retirar las tapas divisoras de ambas tolvas."),
    ("11. Fondo de Tolva", "11.1", "Configuración según tipo de siembra (abastecimiento o dosificación)."),
    ("12. Regulaciones", "12.2", "Dosificación de semillas. Colocar fondo dosificador, verificar chevrones/encauzador."),
    ("12. Regulaciones", "12.3", "Dosificación de fertilizantes. Verificar correcta colocación de los chevrones."),
    ("12. Regulaciones", "12.5", "Configurar Y según tren de siembra a utilizar."),
    ("13. Turbina de Vacío", "13.2", "Regulación de caudal según vacío requerido (Maiz, Soja, Girasol, Sorgo)."),
    ("14. Monitor", "14.1", "Carga de lotes, regulaciones, configuraciones y calibraciones."),
    ("15. Calibración de Dosis", "15.1", "Calibración de dosis de semilla y fertilizante."),
    ("16. Seguridad Operativa", "16.1", "Consideraciones según configuración de máquina."),
    ("17. Mantenimiento", "17.1", "Controlar ajuste de bulones de ruedas."),
    ("17. Mantenimiento", "17.5", "Engrasar Barra Cardanica (cada 16 hs)."),
    ("17. Mantenimiento", "17.6", "Controlar nivel de aceite depósito YPFBP 68 (100 lts)."),
];

#[rustfmt::skip]
const PLANTOR_ITEMS: &[(&str, &str, &str)] = &[
    ("1. Verificación General", "1.1", "Cumplimiento del certificado de recepción."),
    ("1. Verificación General", "1.2", "Cumplimiento del certificado de preentrega."),
    ("2. Introducción", "2.1", "Muestra de manual y política de garantía al cliente."),
    ("3. Tractor", "3.1", "Verificación de las especificaciones técnicas del tractor vs. máquina."),
    ("3. Tractor", "3.2", "Colocación del monitor y cableado en la cabina del tractor."),
    ("3. Tractor", "3.5", "Vinculación y medición de caudales hidráulicos (Movimiento, Soplado, Vacío, Motores, Drenaje)."),
    ("3. Tractor", "3.6", "Medición 540 RPM en toma de fuerza del tractor."),
    ("3. Tractor", "3.7", "Colocación y regulación del radar (35° inclinación, 80 cm suelo)."),
    ("4. Pasa de Transporte a Trabajo", "4.1", "Explicación al cliente para el paso de transporte a trabajo y viceversa / Regulaciones."),
    ("5. Tren de Siembra", "5.1", "Alineación de cuchillas de corte."),
    ("5. Tren de Siembra", "5.2", "Regulación de profundidad y presión cuchillas (dejar libre 5 hilos de rosca)."),
    ("5. Tren de Siembra", "5.7", "Regulación de ángulo y presión barrerastrojos."),
    ("5. Tren de Siembra", "5.8", "Regulación de presión, alineación y profundidad de doble disco fertilizador."),
    ("6. Dosificador", "6.1", "Colocación de placas, enrasadores y expulsores correspondientes."),
    ("6. Dosificador", "6.2", "Regulación de las guillotinas de entrada."),
    ("7. Sensores", "7.1", "Regulación del sensor de levante."),
    ("7. Sensores", "7.2", "Verificación de posición correcta de sensores de velocidad y RPM."),
    ("8. Fondo de Tolva", "8.1", "Colocación en modo abastecimiento o modo dosificación."),
    ("8. Fondo de Tolva", "8.2", "Según tipo de siembra, verificar correcta colocación de chevrones y configuración de tolvas."),
    ("9. Regulaciones", "9.1", "Abastecimiento de semillas."),
    ("9. Regulaciones", "9.2", "Dosificación de fertilizantes."),
    ("10. Turbina de Vacío", "10.2", "Regulación de caudal según vacío requerido (Maiz, Soja, Girasol, Sorgo)."),
    ("11. Monitor", "11.1", "Carga de lotes, regulaciones, configuraciones y calibraciones."),
    ("12. Topes Cilindros", "12.1", "Regulación de topes en cilindros hidráulicos."),
    ("13. Control de Dosis", "13.1", "Control de dosis de semilla."),
    ("13. Control de Dosis", "13.2", "Control de dosis de fertilizante."),
    ("14. Seguridad Operativa", "14.1", "Consideraciones según configuración de máquina."),
    ("15. Mantenimiento", "15.1", "Controlar ajuste de bulones de ruedas."),
];
