use trust_iec::config::{ArithmeticConfig, ExptMode};
use trust_iec::error::status_code;
use trust_iec::value::{IecType, Number, Value};
use trust_iec::{IecError, OperandStack, RuntimeConfig, StandardLibrary};

#[test]
fn operators_are_registered_by_upper_case_name() {
    let lib = StandardLibrary::new();
    for name in [
        "ADD", "MUL", "SUB", "DIV", "MOD", "EXPT", "SHL", "SHR", "ROL", "ROR", "GT", "GE", "EQ",
        "LE", "LT", "NE", "MOVE", "SEL", "MAX", "MIN", "LIMIT", "MUX", "LEN", "CONCAT", "SQRT",
        "ADD_TIME",
    ] {
        assert!(lib.get(name).is_some(), "{name} missing");
    }
    assert!(lib.get("shl").is_some());
    assert!(lib.names().any(|name| name == "ATAN2"));
}

#[test]
fn fixed_arity_operands_are_taken_in_push_order() {
    let lib = StandardLibrary::new();
    let a = Value::from(10_i16);
    let b = Value::from(4_i16);
    let mut stack: OperandStack<'_> = [&a, &b].into_iter().collect();
    let mut result = Value::null();
    assert_eq!(lib.call("SUB", &mut result, &mut stack), Ok(()));
    assert_eq!(result.as_i64(), 6);
    assert!(stack.is_empty());
}

#[test]
fn unknown_names_drain_the_stack() {
    let lib = StandardLibrary::new();
    let a = Value::from(1_i16);
    let mut stack: OperandStack<'_> = [&a].into_iter().collect();
    let mut result = Value::null();
    let status = lib.call("FROBNICATE", &mut result, &mut stack);
    assert_eq!(status, Err(IecError::ElementNotFound));
    assert_eq!(status_code(&status), 0x08);
    assert!(stack.is_empty());
}

#[test]
fn too_few_operands() {
    let lib = StandardLibrary::new();
    let a = Value::from(1_i16);
    let mut stack: OperandStack<'_> = [&a].into_iter().collect();
    let mut result = Value::null();
    assert_eq!(
        lib.call("DIV", &mut result, &mut stack),
        Err(IecError::NullParameter)
    );
    assert!(stack.is_empty());
}

#[test]
fn expt_mode_follows_config() {
    let config = RuntimeConfig {
        arithmetic: ArithmeticConfig {
            expt: ExptMode::LegacyXor,
        },
        ..RuntimeConfig::default()
    };
    let lib = StandardLibrary::with_config(&config);
    let a = Value::from(6_i16);
    let b = Value::from(3_i16);
    let mut stack: OperandStack<'_> = [&a, &b].into_iter().collect();
    let mut result = Value::null();
    assert_eq!(lib.call("EXPT", &mut result, &mut stack), Ok(()));
    assert_eq!(result.number(), Some(Number::Real(5.0)));

    let mut stack: OperandStack<'_> = [&a, &b].into_iter().collect();
    StandardLibrary::new()
        .call("EXPT", &mut result, &mut stack)
        .expect("expt");
    assert_eq!(result.number(), Some(Number::Real(216.0)));
}

#[test]
fn host_functions_can_be_registered() {
    let mut lib = StandardLibrary::new();
    lib.register("answer", |result, operands| {
        operands.flush();
        result.to_type(IecType::DInt);
        result.set_number(Number::Int(42));
        Ok(())
    });
    let mut stack = OperandStack::new();
    let mut result = Value::null();
    assert_eq!(lib.call("ANSWER", &mut result, &mut stack), Ok(()));
    assert_eq!(result.as_i64(), 42);
}
