// ./src/fee/circuit_shape.rs

use crate::types::SerializedTransaction;

/// Compares two generated batches structurally: same number of
/// sub-transactions and, pairwise, equal commitment and nullifier counts.
///
/// A fee change that leaves the circuit shape intact cannot change gas cost,
/// so the convergence loop uses this as a short-circuit before re-estimating.
pub fn same_circuit_shape(a: &[SerializedTransaction], b: &[SerializedTransaction]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).all(|(tx_a, tx_b)| {
        tx_a.commitments.len() == tx_b.commitments.len()
            && tx_a.nullifiers.len() == tx_b.nullifiers.len()
    })
}
