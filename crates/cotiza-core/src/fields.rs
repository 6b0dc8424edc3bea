//! Canonical coverage fields every vendor extraction is normalized into.

pub const FORMA_DE_PAGO: &str = "Forma de Pago";
pub const DANOS_MATERIALES: &str = "Daños Materiales";
pub const DEDUCIBLE_DM: &str = "Deducible - DM";
pub const ROBO_TOTAL: &str = "Robo Total";
pub const DEDUCIBLE_RT: &str = "Deducible - RT";
pub const RESPONSABILIDAD_CIVIL: &str = "Responsabilidad Civil";
pub const GASTOS_MEDICOS: &str = "Gastos Medicos Ocupantes";
pub const ASISTENCIA_LEGAL: &str = "Asistencia Legal";
pub const ASISTENCIA_VIAJES: &str = "Asistencia Viajes";
pub const ATLAS_CERO_PLUS: &str = "Atlas Cero Plus por PT de DM";
pub const ACCIDENTE_CONDUCTOR: &str = "Accidente al conductor";
pub const RC_CATASTROFICA: &str = "Responsabilidad civil catastrofica";
pub const DESBIELAMIENTO: &str = "Desbielamiento por agua al motor";
pub const PRIMA_NETA: &str = "Prima Neta";
pub const RECARGOS: &str = "Recargos";
pub const DERECHOS_POLIZA: &str = "Derechos de Póliza";
pub const IVA: &str = "IVA";
pub const PRIMA_TOTAL: &str = "Prima Total";

/// Row order of the comparison table. Coverages first, premium breakdown last.
pub const MASTER_FIELDS: &[&str] = &[
    FORMA_DE_PAGO,
    DANOS_MATERIALES,
    DEDUCIBLE_DM,
    ROBO_TOTAL,
    DEDUCIBLE_RT,
    RESPONSABILIDAD_CIVIL,
    GASTOS_MEDICOS,
    ASISTENCIA_LEGAL,
    ASISTENCIA_VIAJES,
    ATLAS_CERO_PLUS,
    ACCIDENTE_CONDUCTOR,
    RC_CATASTROFICA,
    DESBIELAMIENTO,
    PRIMA_NETA,
    RECARGOS,
    DERECHOS_POLIZA,
    IVA,
    PRIMA_TOTAL,
];

pub fn is_master_field(name: &str) -> bool {
    MASTER_FIELDS.contains(&name)
}
