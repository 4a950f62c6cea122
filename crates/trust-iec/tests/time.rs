use trust_iec::stdlib::time::{add_time, div_time, mul_time, sub_time};
use trust_iec::value::{Duration, IecType, Value};
use trust_iec::{IecError, OperandStack, StandardLibrary};

fn ms(millis: i64) -> Value {
    Value::from(Duration::from_millis(millis))
}

#[test]
fn add_and_sub_durations() {
    let mut result = Value::null();
    assert_eq!(add_time(&mut result, &ms(1_500), &ms(250)), Ok(()));
    assert_eq!(result.ty(), IecType::Time);
    assert_eq!(result.as_duration(), Some(Duration::from_millis(1_750)));

    assert_eq!(sub_time(&mut result, &ms(100), &ms(250)), Ok(()));
    assert_eq!(result.as_duration(), Some(Duration::from_millis(-150)));
}

#[test]
fn add_saturates() {
    let huge = Value::from(Duration::from_nanos(i64::MAX));
    let mut result = Value::null();
    assert_eq!(add_time(&mut result, &huge, &ms(1)), Ok(()));
    assert_eq!(result.as_duration(), Some(Duration::from_nanos(i64::MAX)));
}

#[test]
fn scaling_by_numbers() {
    let mut result = Value::null();
    assert_eq!(mul_time(&mut result, &ms(200), &Value::from(3_i16)), Ok(()));
    assert_eq!(result.as_duration(), Some(Duration::from_millis(600)));

    assert_eq!(mul_time(&mut result, &ms(200), &Value::from(1.5_f64)), Ok(()));
    assert_eq!(result.as_duration(), Some(Duration::from_millis(300)));

    assert_eq!(div_time(&mut result, &ms(900), &Value::from(4_i16)), Ok(()));
    assert_eq!(result.as_duration(), Some(Duration::from_micros(225_000)));

    assert_eq!(
        div_time(&mut result, &ms(900), &Value::from(0_i16)),
        Err(IecError::NotAllowedType)
    );
}

#[test]
fn operands_must_be_time() {
    let mut result = Value::null();
    assert_eq!(
        add_time(&mut result, &Value::from(5_i64), &ms(1)),
        Err(IecError::NotAllowedType)
    );
    assert_eq!(
        mul_time(&mut result, &ms(1), &ms(1)),
        Err(IecError::NotAllowedType)
    );
    assert_eq!(result.ty(), IecType::Null);
}

#[test]
fn registry_time_ops() {
    let lib = StandardLibrary::new();
    let a = ms(40);
    let b = ms(2);
    let mut stack: OperandStack<'_> = [&a, &b].into_iter().collect();
    let mut result = Value::null();
    assert_eq!(lib.call("SUB_TIME", &mut result, &mut stack), Ok(()));
    assert_eq!(result.as_duration(), Some(Duration::from_millis(38)));
}
