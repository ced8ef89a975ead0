//! End-to-end compilation tests.
//!
//! These drive the full pipeline from a circuit to rendered program text and
//! check the exact output for the small reference circuits.

use klm_compile::program::{EPILOGUE, INDENT, PROLOGUE};
use klm_compile::{
    BuiltinCircuit, CompileError, Compiler, FileSink, JsonCircuitFile, KlmDevice, MemorySink,
    Protocol, ValidationPolicy,
};
use klm_ir::{Circuit, Instruction, QubitId, StandardGate};
use proptest::prelude::*;

/// Helper: compile with the default policy and return the rendered text.
fn compile_text(circuit: &Circuit) -> String {
    Compiler::new(Protocol::Klm)
        .compile(circuit, &KlmDevice::new(circuit.num_qubits()))
        .unwrap()
        .render()
}

/// Helper: body lines with the indentation removed.
fn body_lines(text: &str) -> Vec<String> {
    let body = text
        .strip_prefix(PROLOGUE)
        .and_then(|s| s.strip_suffix(EPILOGUE))
        .expect("program must be wrapped in prologue and epilogue");
    body.lines()
        .map(|line| {
            line.strip_prefix(INDENT)
                .expect("body lines are indented")
                .to_string()
        })
        .collect()
}

/// Helper: non-blank body lines.
fn components(text: &str) -> Vec<String> {
    body_lines(text)
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect()
}

#[test]
fn test_empty_circuit() {
    let text = compile_text(&Circuit::with_size("empty", 1));
    assert!(text.starts_with(".text\n    _init:\n        nop"));
    assert!(text.ends_with("_exit:\n        nop \n        ret\n"));
    assert!(components(&text).is_empty());
}

#[test]
fn test_single_hadamard() {
    let mut circuit = Circuit::with_size("h", 1);
    circuit.h(QubitId(0)).unwrap();

    let text = compile_text(&circuit);
    assert_eq!(
        text,
        ".text\n    _init:\n        nop\n\n\
         \x20   directional_standard 5 20 0.4 15 (1,0) (1,0)\n    \n    \n\
         \x20   _exit:\n        nop \n        ret\n"
    );
}

#[test]
fn test_single_pauli_x() {
    let mut circuit = Circuit::with_size("x", 2);
    circuit.x(QubitId(1)).unwrap();

    let text = compile_text(&circuit);
    assert_eq!(components(&text), vec!["waveguide_crossing (3,2) (3,2)"]);
}

#[test]
fn test_adjacent_cnot() {
    let mut circuit = Circuit::with_size("cnot", 2);
    circuit.cx(QubitId(0), QubitId(1)).unwrap();

    let lines = components(&compile_text(&circuit));
    assert_eq!(
        lines,
        vec![
            "directional_standard 5 20 0.4 15 (3,2) (3,2)",
            "directional_standard 5 20 0.4 15 (~,1) (~,1)",
            "directional_standard 5 20 0.4 15 (0,~) (0,~)",
            "directional_standard 5 20 0.4 15 (2,~) (2,~)",
            "directional_standard 5 20 0.4 15 (3,2) (3,2)",
        ]
    );
    assert!(lines.iter().all(|line| !line.starts_with("waveguide_crossing")));
}

#[test]
fn test_distant_cnot_is_routed() {
    let mut circuit = Circuit::with_size("far", 4);
    circuit.cx(QubitId(0), QubitId(3)).unwrap();

    let lines = body_lines(&compile_text(&circuit));
    let swap = [
        "waveguide_crossing (2,1) (2,1)",
        "waveguide_crossing (1,0) (1,0)",
        "waveguide_crossing (3,2) (3,2)",
        "waveguide_crossing (2,1) (2,1)",
        "",
    ];
    let core = [
        "directional_standard 5 20 0.4 15 (7,6) (7,6)",
        "directional_standard 5 20 0.4 15 (~,1) (~,1)",
        "directional_standard 5 20 0.4 15 (0,~) (0,~)",
        "directional_standard 5 20 0.4 15 (6,~) (6,~)",
        "directional_standard 5 20 0.4 15 (7,6) (7,6)",
    ];

    assert_eq!(lines[..5], swap);
    assert_eq!(lines[5..10], core);
    assert_eq!(lines[10..15], swap);
    assert!(lines[15..].iter().all(String::is_empty));
}

#[test]
fn test_emission_follows_moment_order() {
    let mut circuit = Circuit::with_size("order", 2);
    circuit
        .x(QubitId(0))
        .unwrap()
        .h(QubitId(1))
        .unwrap()
        .h(QubitId(0))
        .unwrap();

    let lines = components(&compile_text(&circuit));
    assert_eq!(
        lines,
        vec![
            "waveguide_crossing (1,0) (1,0)",
            "directional_standard 5 20 0.4 15 (3,2) (3,2)",
            "directional_standard 5 20 0.4 15 (1,0) (1,0)",
        ]
    );
}

#[test]
fn test_unsupported_gate_emits_nothing() {
    let mut circuit = Circuit::with_size("z", 1);
    circuit.z(QubitId(0)).unwrap();

    let text = compile_text(&circuit);
    assert_eq!(text, compile_text(&Circuit::with_size("empty", 1)));
}

#[test]
fn test_controlled_z_emits_nothing() {
    let mut circuit = Circuit::with_size("cz", 2);
    circuit
        .append(Instruction::two_qubit_gate(
            StandardGate::CZ,
            QubitId(0),
            QubitId(1),
        ))
        .unwrap()
        .h(QubitId(1))
        .unwrap();

    let lines = components(&compile_text(&circuit));
    assert_eq!(lines, vec!["directional_standard 5 20 0.4 15 (3,2) (3,2)"]);
}

#[test]
fn test_report_policy_compiles_non_local_cnot() {
    let mut circuit = Circuit::with_size("far", 3);
    circuit.cx(QubitId(2), QubitId(0)).unwrap();

    let program = Compiler::new(Protocol::Klm)
        .compile(&circuit, &KlmDevice::new(3))
        .unwrap();
    assert_eq!(program.component_count(), 13);
}

#[test]
fn test_enforce_policy_rejects_non_local_cnot() {
    let mut circuit = Circuit::with_size("far", 3);
    circuit.cx(QubitId(2), QubitId(0)).unwrap();

    let err = Compiler::new(Protocol::Klm)
        .with_policy(ValidationPolicy::Enforce)
        .compile(&circuit, &KlmDevice::new(3))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Constraint violation: Non-local interaction: CX(q2, q0)"
    );
}

#[test]
fn test_enforce_policy_accepts_builtins() {
    let compiler = Compiler::new(Protocol::Klm).with_policy(ValidationPolicy::Enforce);
    for builtin in BuiltinCircuit::ALL {
        let device = KlmDevice::new(builtin.num_qubits());
        assert!(compiler.compile(&builtin, &device).is_ok(), "{builtin}");
    }
}

#[test]
fn test_file_sink_writes_rendered_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quantum.qa");
    let circuit = Circuit::gate_tour().unwrap();

    let mut sink = FileSink::new(&path);
    let program = Compiler::new(Protocol::Klm)
        .compile_to(&circuit, &KlmDevice::new(3), &mut sink)
        .unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, program.render());

    let mut memory = MemorySink::new();
    Compiler::new(Protocol::Klm)
        .compile_to(&circuit, &KlmDevice::new(3), &mut memory)
        .unwrap();
    assert_eq!(memory.text(), written);
}

#[test]
fn test_file_sink_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("quantum.qa");

    let err = Compiler::new(Protocol::Klm)
        .compile_to(
            &Circuit::bell().unwrap(),
            &KlmDevice::new(2),
            &mut FileSink::new(&path),
        )
        .unwrap_err();

    match err {
        CompileError::Sink { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected sink error, got {other}"),
    }
}

#[test]
fn test_json_circuit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tour.json");
    let circuit = Circuit::gate_tour().unwrap();
    std::fs::write(&path, serde_json::to_string_pretty(&circuit).unwrap()).unwrap();

    let from_file = Compiler::new(Protocol::Klm)
        .compile(&JsonCircuitFile::new(&path), &KlmDevice::new(3))
        .unwrap();
    let direct = Compiler::new(Protocol::Klm)
        .compile(&circuit, &KlmDevice::new(3))
        .unwrap();
    assert_eq!(from_file, direct);
}

#[test]
fn test_json_circuit_file_is_verified() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"name":"bad","num_qubits":1,"moments":[{"operations":[
            {"kind":{"Gate":"H"},"qubits":[5]}
        ]}]}"#,
    )
    .unwrap();

    let err = Compiler::new(Protocol::Klm)
        .compile(&JsonCircuitFile::new(&path), &KlmDevice::new(1))
        .unwrap_err();
    assert!(matches!(err, CompileError::Ir(_)), "{err}");
}

/// Strategy: a random sequence of supported operations on a line of `n`
/// qubits, with CNOTs only on neighbours.
fn supported_ops(n: u32) -> impl Strategy<Value = Vec<(u8, u32)>> {
    prop::collection::vec((0_u8..3, 0..n), 0..24)
}

proptest! {
    #[test]
    fn prop_program_is_framed(ops in supported_ops(5)) {
        let mut circuit = Circuit::with_size("random", 5);
        let mut expected_components = 0;
        for (kind, pos) in ops {
            let q = QubitId(pos);
            match kind {
                0 => { circuit.h(q).unwrap(); expected_components += 1; }
                1 => { circuit.x(q).unwrap(); expected_components += 1; }
                _ => {
                    let t = QubitId(if pos == 4 { 3 } else { pos + 1 });
                    circuit.cx(q, t).unwrap();
                    expected_components += 5;
                }
            }
        }

        let text = compile_text(&circuit);
        prop_assert!(text.starts_with(PROLOGUE));
        prop_assert!(text.ends_with(EPILOGUE));
        prop_assert_eq!(components(&text).len(), expected_components);
    }
}
