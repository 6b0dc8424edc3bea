use rust_decimal::Decimal;
use tracing::debug;

use crate::config::CompareOptions;
use crate::fields::{DERECHOS_POLIZA, IVA, PRIMA_NETA, PRIMA_TOTAL, RECARGOS};
use crate::model::{ExtractionResult, FieldValue};

/// Reconcile the premium breakdown of one quote.
///
/// Implausible captures are dropped first, then missing IVA and Prima Total
/// are derived from the remaining amounts. Values taken from the document
/// are never overwritten.
pub fn complete_financials(result: &mut ExtractionResult, options: &CompareOptions) {
    if let Some(recargos) = result.amount(RECARGOS) {
        if recargos > options.recargos_cap {
            debug!(%recargos, cap = %options.recargos_cap, "dropping implausible Recargos");
            result.remove(RECARGOS);
        }
    }

    if let Some(neta) = result.amount(PRIMA_NETA) {
        if neta < options.min_premium {
            debug!(%neta, min = %options.min_premium, "dropping implausible Prima Neta");
            result.remove(PRIMA_NETA);
        }
    }

    let Some(neta) = result.amount(PRIMA_NETA) else {
        return;
    };
    let subtotal = [RECARGOS, DERECHOS_POLIZA].iter().try_fold(neta, |acc, field| {
        acc.checked_add(result.amount(field).unwrap_or(Decimal::ZERO))
    });
    let Some(subtotal) = subtotal else {
        debug!("premium breakdown out of range, nothing derived");
        return;
    };

    if result.get(IVA).is_none() {
        if let Some(iva) = subtotal.checked_mul(options.iva_rate) {
            debug!(%iva, "derived IVA");
            result.insert(IVA, FieldValue::amount(iva));
        }
    }

    if result.get(PRIMA_TOTAL).is_none() {
        if let Some(total) = result.amount(IVA).and_then(|iva| subtotal.checked_add(iva)) {
            debug!(%total, "derived Prima Total");
            result.insert(PRIMA_TOTAL, FieldValue::amount(total));
        }
    }
}
