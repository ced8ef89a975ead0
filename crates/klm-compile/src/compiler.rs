//! Compilation driver.

use tracing::{debug, error, info, instrument, warn};

use klm_ir::Circuit;

use crate::device::DeviceConstraints;
use crate::error::{CompileError, CompileResult};
use crate::gates::{GateOp, translate};
use crate::pass::{CircuitPass, ProgramPass};
use crate::program::Program;
use crate::protocol::Protocol;
use crate::sink::ProgramSink;
use crate::source::CircuitSource;

/// What to do when a circuit violates the device constraints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Log the violation and compile anyway.
    #[default]
    Report,
    /// Abort compilation with [`CompileError::Constraint`].
    Enforce,
}

/// Compiles logical circuits into photonic programs.
///
/// The pipeline is: generate the circuit, validate it against the device,
/// run circuit passes, translate every operation in moment order, run
/// program passes. [`Compiler::compile_to`] also renders the result and
/// writes it to a sink.
#[derive(Default)]
pub struct Compiler {
    protocol: Protocol,
    policy: ValidationPolicy,
    circuit_passes: Vec<Box<dyn CircuitPass>>,
    program_passes: Vec<Box<dyn ProgramPass>>,
}

impl Compiler {
    /// Create a compiler for `protocol` with no passes.
    pub fn new(protocol: Protocol) -> Self {
        Self {
            protocol,
            ..Self::default()
        }
    }

    /// Set the validation policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register a pass to run on the circuit before translation.
    #[must_use]
    pub fn with_circuit_pass(mut self, pass: impl CircuitPass + 'static) -> Self {
        self.circuit_passes.push(Box::new(pass));
        self
    }

    /// Register a pass to run on the program after translation.
    #[must_use]
    pub fn with_program_pass(mut self, pass: impl ProgramPass + 'static) -> Self {
        self.program_passes.push(Box::new(pass));
        self
    }

    /// Target protocol.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Active validation policy.
    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Compile the circuit produced by `source` for `device`.
    #[instrument(skip_all, fields(source = source.name(), device = device.name()))]
    pub fn compile(
        &self,
        source: &dyn CircuitSource,
        device: &dyn DeviceConstraints,
    ) -> CompileResult<Program> {
        let mut circuit = source.generate_circuit()?;
        info!(
            "Compiling '{}' ({} qubits, {} operations) for {}",
            circuit.name(),
            circuit.num_qubits(),
            circuit.num_operations(),
            self.protocol
        );
        debug!("Input circuit:\n{circuit}");

        if let Err(violation) = device.validate_circuit(&circuit) {
            match self.policy {
                ValidationPolicy::Enforce => return Err(violation.into()),
                ValidationPolicy::Report => error!("Device {}: {}", device.name(), violation),
            }
        }

        for pass in &self.circuit_passes {
            debug!("Running circuit pass: {}", pass.name());
            pass.run(&mut circuit)?;
        }

        let mut program = self.translate(&circuit)?;

        for pass in &self.program_passes {
            debug!("Running program pass: {}", pass.name());
            pass.run(&mut program)?;
        }

        info!(
            "Compilation completed: {} operations, {} components",
            program.num_operations(),
            program.component_count()
        );
        Ok(program)
    }

    /// Compile and write the rendered program to `sink`.
    #[instrument(skip_all, fields(source = source.name()))]
    pub fn compile_to(
        &self,
        source: &dyn CircuitSource,
        device: &dyn DeviceConstraints,
        sink: &mut dyn ProgramSink,
    ) -> CompileResult<Program> {
        let program = self.compile(source, device)?;
        sink.write_program(&program.render())?;
        Ok(program)
    }

    /// Translate every operation of `circuit`, in moment order.
    ///
    /// Unsupported operations are skipped without a separator line.
    pub fn translate(&self, circuit: &Circuit) -> CompileResult<Program> {
        let mut program = Program::new();

        for (index, moment) in circuit.moments().iter().enumerate() {
            for instruction in moment.operations() {
                let op = GateOp::from(instruction);
                match translate(&op, self.protocol)? {
                    Some(block) => {
                        debug!(
                            moment = index,
                            components = block.component_count(),
                            "Translated {}",
                            instruction
                        );
                        program.push_operation(block);
                    }
                    None => warn!("Skipping {}: no {} lowering", instruction, self.protocol),
                }
            }
        }

        Ok(program)
    }
}

impl std::fmt::Debug for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiler")
            .field("protocol", &self.protocol)
            .field("policy", &self.policy)
            .field("circuit_passes", &self.circuit_passes.len())
            .field("program_passes", &self.program_passes.len())
            .finish()
    }
}

/// Wrap a pass failure in [`CompileError::PassFailed`].
pub fn pass_failed(name: &str, reason: impl std::fmt::Display) -> CompileError {
    CompileError::PassFailed {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::KlmDevice;
    use crate::pass::{IdentityPass, PassKind};
    use klm_ir::QubitId;

    struct RejectAll;

    impl CircuitPass for RejectAll {
        fn name(&self) -> &str {
            "reject_all"
        }

        fn kind(&self) -> PassKind {
            PassKind::Analysis
        }

        fn run(&self, circuit: &mut Circuit) -> CompileResult<()> {
            Err(pass_failed(self.name(), format!("refusing {}", circuit.name())))
        }
    }

    #[test]
    fn test_defaults() {
        let compiler = Compiler::default();
        assert_eq!(compiler.protocol(), Protocol::Klm);
        assert_eq!(compiler.policy(), ValidationPolicy::Report);
    }

    #[test]
    fn test_measurement_is_skipped() {
        let compiler = Compiler::new(Protocol::Klm);
        let program = compiler
            .compile(&Circuit::bell().unwrap(), &KlmDevice::new(2))
            .unwrap();
        // H and CNOT are translated; the measurement is not.
        assert_eq!(program.num_operations(), 2);
        assert_eq!(program.component_count(), 6);
    }

    #[test]
    fn test_identity_passes_change_nothing() {
        let circuit = Circuit::gate_tour().unwrap();
        let device = KlmDevice::new(3);

        let plain = Compiler::new(Protocol::Klm)
            .compile(&circuit, &device)
            .unwrap();
        let with_passes = Compiler::new(Protocol::Klm)
            .with_circuit_pass(IdentityPass)
            .with_program_pass(IdentityPass)
            .compile(&circuit, &device)
            .unwrap();

        assert_eq!(plain, with_passes);
    }

    #[test]
    fn test_failing_pass_aborts() {
        let compiler = Compiler::new(Protocol::Klm).with_circuit_pass(RejectAll);
        let err = compiler
            .compile(&Circuit::bell().unwrap(), &KlmDevice::new(2))
            .unwrap_err();
        assert!(matches!(err, CompileError::PassFailed { .. }));
        assert!(err.to_string().contains("refusing bell"));
    }

    #[test]
    fn test_compile_with_debug_logging() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();

        let program = tracing::subscriber::with_default(subscriber, || {
            Compiler::new(Protocol::Klm)
                .compile(&Circuit::teleportation().unwrap(), &KlmDevice::new(3))
        })
        .unwrap();
        assert_eq!(program.num_operations(), 4);
    }

    #[test]
    fn test_enforce_rejects_non_local() {
        let mut circuit = Circuit::with_size("far", 3);
        circuit.cx(QubitId(0), QubitId(2)).unwrap();

        let compiler = Compiler::new(Protocol::Klm).with_policy(ValidationPolicy::Enforce);
        let err = compiler.compile(&circuit, &KlmDevice::new(3)).unwrap_err();
        assert!(matches!(err, CompileError::Constraint(_)));
    }
}
