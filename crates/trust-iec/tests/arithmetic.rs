use trust_iec::config::ExptMode;
use trust_iec::stdlib::arithmetic::{add, div, expt, expt_with, modulo, mul, sub};
use trust_iec::value::{IecType, Number, Value};
use trust_iec::{IecError, OperandStack};

#[test]
fn add_sums_every_operand_and_widens() {
    let a = Value::from(2_i16);
    let b = Value::from(3_i32);
    let c = Value::from(0.5_f64);
    let mut stack: OperandStack<'_> = [&a, &b, &c].into_iter().collect();
    let mut result = Value::null();

    assert_eq!(add(&mut result, &mut stack), Ok(()));
    assert_eq!(result.ty(), IecType::LReal);
    assert_eq!(result.number(), Some(Number::Real(5.5)));
    assert!(stack.is_empty());
}

#[test]
fn add_rejects_non_magnitude_and_drains() {
    let a = Value::from(1_i16);
    let text = Value::string("x", false, false);
    let mut stack: OperandStack<'_> = [&a, &text].into_iter().collect();
    let mut result = Value::from(9_i16);

    assert_eq!(add(&mut result, &mut stack), Err(IecError::NotAllowedType));
    assert!(stack.is_empty());
    assert_eq!(result.as_i64(), 9);
}

#[test]
fn add_on_empty_stack_needs_parameters() {
    let mut stack = OperandStack::new();
    let mut result = Value::null();
    assert_eq!(add(&mut result, &mut stack), Err(IecError::NullParameter));
}

#[test]
fn mul_wraps_at_the_result_width() {
    let a = Value::from(100_i8);
    let b = Value::from(3_i8);
    let mut stack: OperandStack<'_> = [&a, &b].into_iter().collect();
    let mut result = Value::null();

    assert_eq!(mul(&mut result, &mut stack), Ok(()));
    assert_eq!(result.ty(), IecType::SInt);
    assert_eq!(result.as_i64(), 44);
}

#[test]
fn sub_promotes_to_the_wider_operand() {
    let mut result = Value::from(0_i8);
    assert_eq!(
        sub(&mut result, &Value::from(10_i32), &Value::from(15_i16)),
        Ok(())
    );
    assert_eq!(result.ty(), IecType::DInt);
    assert_eq!(result.as_i64(), -5);
}

#[test]
fn div_integer_and_real() {
    let mut result = Value::null();
    assert_eq!(div(&mut result, &Value::from(7_i16), &Value::from(2_i16)), Ok(()));
    assert_eq!(result.ty(), IecType::Int);
    assert_eq!(result.as_i64(), 3);

    let mut result = Value::null();
    assert_eq!(div(&mut result, &Value::from(7_i16), &Value::from(2.0_f64)), Ok(()));
    assert_eq!(result.ty(), IecType::LReal);
    assert_eq!(result.number(), Some(Number::Real(3.5)));
}

#[test]
fn div_by_zero_leaves_result_untouched() {
    let mut result = Value::from(42_i32);
    assert_eq!(
        div(&mut result, &Value::from(1_i32), &Value::from(0_i32)),
        Err(IecError::NotAllowedType)
    );
    assert_eq!(result, Value::from(42_i32));

    assert_eq!(
        div(&mut result, &Value::from(1.0_f64), &Value::from(0.0_f64)),
        Err(IecError::NotAllowedType)
    );
}

#[test]
fn modulo_requires_integers() {
    let mut result = Value::null();
    assert_eq!(modulo(&mut result, &Value::from(-7_i16), &Value::from(3_i16)), Ok(()));
    assert_eq!(result.as_i64(), -1);

    assert_eq!(
        modulo(&mut result, &Value::from(7.0_f64), &Value::from(3_i16)),
        Err(IecError::NotAllowedType)
    );

    let mut zero = Value::null();
    assert_eq!(modulo(&mut zero, &Value::from(7_i16), &Value::from(0_i16)), Ok(()));
    assert_eq!(zero.as_i64(), 0);
}

#[test]
fn expt_raises_in_lreal() {
    let mut result = Value::null();
    assert_eq!(expt(&mut result, &Value::from(2_i16), &Value::from(10_i16)), Ok(()));
    assert_eq!(result.ty(), IecType::LReal);
    assert_eq!(result.number(), Some(Number::Real(1024.0)));
}

#[test]
fn legacy_expt_xors_operands() {
    let mut result = Value::null();
    assert_eq!(
        expt_with(
            &mut result,
            &Value::from(6_i16),
            &Value::from(3_i16),
            ExptMode::LegacyXor
        ),
        Ok(())
    );
    assert_eq!(result.number(), Some(Number::Real(5.0)));
}
