//! High-level circuit builder API.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::moment::Moment;
use crate::qubit::QubitId;

/// A quantum circuit on a line of qubits.
///
/// The circuit is an ordered sequence of [`Moment`]s. Iterating moments in
/// order, then operations within each moment in order, gives the
/// compilation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits; qubits occupy positions `0..num_qubits`.
    num_qubits: u32,
    /// Moments in execution order.
    #[serde(default)]
    moments: Vec<Moment>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            moments: vec![],
        }
    }

    /// Create a circuit with a given number of line qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        let mut circuit = Self::new(name);
        circuit.num_qubits = num_qubits;
        circuit
    }

    /// Add a single qubit at the end of the line.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    // =========================================================================
    // Building
    // =========================================================================

    /// Append an instruction using the earliest-moment strategy.
    ///
    /// The instruction lands in the moment directly after the last moment
    /// touching any of its qubits. A new moment is opened when that moment
    /// does not exist yet.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.check_instruction(&instruction)?;

        let slot = self
            .moments
            .iter()
            .rposition(|m| m.operates_on_any(&instruction.qubits))
            .map_or(0, |last| last + 1);

        if slot == self.moments.len() {
            self.moments.push(Moment::new());
        }
        self.moments[slot].push(instruction);
        Ok(self)
    }

    /// Append a whole moment after the existing ones.
    pub fn push_moment(&mut self, moment: Moment) -> IrResult<&mut Self> {
        for op in moment.operations() {
            self.check_instruction(op)?;
        }
        check_disjoint(self.moments.len(), &moment)?;
        self.moments.push(moment);
        Ok(self)
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(
            StandardGate::CX,
            control,
            target,
        ))
    }

    /// Measure the given qubits under `key`.
    pub fn measure(
        &mut self,
        qubits: impl IntoIterator<Item = QubitId>,
        key: impl Into<String>,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::measure(qubits, key))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Line qubits of this circuit, in position order.
    pub fn qubits(&self) -> Vec<QubitId> {
        QubitId::range(self.num_qubits)
    }

    /// Moments in execution order.
    pub fn moments(&self) -> &[Moment] {
        &self.moments
    }

    /// Number of moments.
    pub fn depth(&self) -> usize {
        self.moments.len()
    }

    /// All operations in compilation order (moment, then operation).
    pub fn operations(&self) -> impl Iterator<Item = &Instruction> + '_ {
        self.moments.iter().flat_map(|m| m.operations().iter())
    }

    /// Total number of operations.
    pub fn num_operations(&self) -> usize {
        self.moments.iter().map(Moment::len).sum()
    }

    /// Re-check every structural invariant.
    ///
    /// Circuits built through [`Circuit::append`] always pass; this exists for
    /// circuits that arrive through deserialization.
    pub fn verify(&self) -> IrResult<()> {
        for (index, moment) in self.moments.iter().enumerate() {
            for op in moment.operations() {
                self.check_instruction(op)?;
            }
            check_disjoint(index, moment)?;
        }
        Ok(())
    }

    fn check_instruction(&self, instruction: &Instruction) -> IrResult<()> {
        if let Some(expected) = instruction.expected_qubits() {
            let got = u32::try_from(instruction.qubits.len()).unwrap_or(u32::MAX);
            if got != expected {
                return Err(IrError::QubitCountMismatch {
                    gate_name: instruction.name().to_string(),
                    expected,
                    got,
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if qubit.position() >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: Some(instruction.name().to_string()),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(instruction.name().to_string()),
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit: `H(q0)`, `CNOT(q1, q0)`, measure both.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2);
        let (q0, q1) = (QubitId(0), QubitId(1));

        circuit.h(q0)?.cx(q1, q0)?.measure([q0, q1], "result")?;

        Ok(circuit)
    }

    /// Create the entangling part of the three-qubit teleportation protocol.
    pub fn teleportation() -> IrResult<Self> {
        let mut circuit = Self::with_size("teleportation", 3);
        let (q0, q1, q2) = (QubitId(0), QubitId(1), QubitId(2));

        circuit.h(q1)?.cx(q1, q2)?.cx(q0, q1)?.h(q0)?;

        Ok(circuit)
    }

    /// Create a three-qubit circuit exercising every lowered gate kind.
    pub fn gate_tour() -> IrResult<Self> {
        let mut circuit = Self::with_size("gate_tour", 3);
        let (q0, q1, q2) = (QubitId(0), QubitId(1), QubitId(2));

        circuit.h(q0)?.h(q1)?.h(q2)?;
        circuit.x(q0)?.x(q2)?;
        circuit.cx(q1, q0)?.cx(q1, q2)?.cx(q1, q2)?.cx(q1, q0)?;
        circuit.h(q0)?.x(q2)?;
        circuit.h(q1)?.h(q2)?;

        Ok(circuit)
    }

    /// Create a GHZ state preparation on `n` qubits using a CNOT chain.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("ghz", n);
        if n == 0 {
            return Ok(circuit);
        }

        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }

        Ok(circuit)
    }
}

fn check_disjoint(index: usize, moment: &Moment) -> IrResult<()> {
    let mut seen = FxHashSet::default();
    for op in moment.operations() {
        for &qubit in &op.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::OverlappingMoment {
                    moment: index,
                    qubit,
                });
            }
        }
    }
    Ok(())
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} qubits)", self.name, self.num_qubits)?;
        for (index, moment) in self.moments.iter().enumerate() {
            let ops = moment
                .operations()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "  {index}: {ops}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_add_qubit() {
        let mut circuit = Circuit::new("test");
        assert_eq!(circuit.add_qubit(), QubitId(0));
        assert_eq!(circuit.add_qubit(), QubitId(1));
        assert_eq!(circuit.qubits(), vec![QubitId(0), QubitId(1)]);
    }

    #[test]
    fn test_earliest_insertion() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit
            .h(QubitId(0))
            .unwrap()
            .h(QubitId(1))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .x(QubitId(2))
            .unwrap();

        // H(q0), H(q1), X(q2) share the first moment; the CNOT waits.
        assert_eq!(circuit.depth(), 2);
        assert_eq!(circuit.moments()[0].len(), 3);
        assert_eq!(circuit.moments()[1].len(), 1);

        let names: Vec<_> = circuit.operations().map(|op| op.to_string()).collect();
        assert_eq!(names, vec!["H(q0)", "H(q1)", "X(q2)", "CX(q0, q1)"]);
    }

    #[test]
    fn test_bell_state() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.num_operations(), 3);
    }

    #[test]
    fn test_gate_tour() {
        let circuit = Circuit::gate_tour().unwrap();
        assert_eq!(circuit.num_operations(), 13);
        assert!(circuit.verify().is_ok());
    }

    #[test]
    fn test_ghz_state() {
        let circuit = Circuit::ghz(4).unwrap();
        assert_eq!(circuit.num_operations(), 4);
        assert_eq!(circuit.depth(), 4);
        assert_eq!(Circuit::ghz(0).unwrap().num_operations(), 0);
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut circuit = Circuit::with_size("test", 2);
        let err = circuit.h(QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { .. }));
    }

    #[test]
    fn test_duplicate_qubit() {
        let mut circuit = Circuit::with_size("test", 2);
        let err = circuit.cx(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_qubit_count_mismatch() {
        let mut circuit = Circuit::with_size("test", 3);
        let bad = Instruction::gate(StandardGate::CX, [QubitId(0)]);
        let err = circuit.append(bad).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_push_overlapping_moment() {
        let mut circuit = Circuit::with_size("test", 2);
        let moment = Moment::from_operations([
            Instruction::single_qubit_gate(StandardGate::H, QubitId(0)),
            Instruction::single_qubit_gate(StandardGate::X, QubitId(0)),
        ]);
        let err = circuit.push_moment(moment).unwrap_err();
        assert!(matches!(err, IrError::OverlappingMoment { moment: 0, .. }));
    }

    #[test]
    fn test_display() {
        let circuit = Circuit::bell().unwrap();
        let text = circuit.to_string();
        assert!(text.starts_with("bell (2 qubits)"));
        assert!(text.contains("CX(q1, q0)"));
    }

    #[test]
    fn test_display_lists_every_moment() {
        let circuit = Circuit::teleportation().unwrap();
        let text = circuit.to_string();
        assert_eq!(text.lines().count(), 1 + circuit.depth());
        assert!(text.contains("  0: H(q1)"));
        assert!(text.ends_with('\n'));
    }
}
