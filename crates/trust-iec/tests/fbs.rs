use trust_iec::clock::ManualClock;
use trust_iec::stdlib::fbs::{ctd, ctu, f_trig, r_trig, rs, sr, tof, ton, tp};
use trust_iec::value::{Attributes, Duration, IecType, Value};
use trust_iec::IecError;

fn edge(on: bool) -> Value {
    let mut value = Value::new(IecType::REdge);
    value.set_bool(on);
    value
}

fn ms(millis: i64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn sr_is_set_dominant() {
    let mut q1 = Value::null();
    assert_eq!(sr(&mut q1, &Value::from(true), &Value::from(true)), Ok(()));
    assert!(q1.as_bool());
    assert_eq!(q1.ty(), IecType::Bool);
    assert!(q1.attributes().contains(Attributes::MAINTAIN));

    sr(&mut q1, &Value::from(false), &Value::from(false)).expect("hold");
    assert!(q1.as_bool());
    sr(&mut q1, &Value::from(false), &Value::from(true)).expect("reset");
    assert!(!q1.as_bool());
}

#[test]
fn rs_is_reset_dominant() {
    let mut q1 = Value::null();
    rs(&mut q1, &Value::from(true), &Value::from(false)).expect("set");
    assert!(q1.as_bool());
    rs(&mut q1, &Value::from(false), &Value::from(false)).expect("hold");
    assert!(q1.as_bool());
    rs(&mut q1, &Value::from(true), &Value::from(true)).expect("reset");
    assert!(!q1.as_bool());
}

#[test]
fn bistables_reject_non_bool_inputs() {
    let mut q1 = Value::null();
    assert_eq!(
        sr(&mut q1, &Value::from(1_i16), &Value::from(false)),
        Err(IecError::NotAllowedType)
    );
    assert_eq!(q1.ty(), IecType::Null);
}

#[test]
fn r_trig_fires_once_per_rising_edge() {
    let mut q = Value::null();
    let mut seen = Vec::new();
    for clk in [false, true, true, false, true] {
        r_trig(&mut q, &Value::from(clk)).expect("r_trig");
        seen.push(q.as_bool());
    }
    assert_eq!(seen, [false, true, false, false, true]);
}

#[test]
fn f_trig_fires_once_per_falling_edge() {
    let mut q = Value::null();
    let mut seen = Vec::new();
    for clk in [true, false, false, true, false] {
        f_trig(&mut q, &Value::from(clk)).expect("f_trig");
        seen.push(q.as_bool());
    }
    assert_eq!(seen, [false, true, false, false, true]);

    let mut fresh = Value::null();
    f_trig(&mut fresh, &Value::from(false)).expect("f_trig");
    assert!(fresh.as_bool());
}

#[test]
fn ctu_counts_to_preset() {
    let pv = Value::from(3_i16);
    let mut cv = Value::from(0_i16);
    let mut q = Value::null();
    let mut counts = Vec::new();
    let mut outputs = Vec::new();
    for _ in 0..5 {
        ctu(&mut q, &edge(true), &Value::from(false), &pv, &mut cv).expect("ctu");
        counts.push(cv.as_i64());
        outputs.push(q.as_bool());
    }
    assert_eq!(counts, [1, 2, 3, 3, 3]);
    assert_eq!(outputs, [false, false, true, true, true]);

    ctu(&mut q, &edge(false), &Value::from(true), &pv, &mut cv).expect("reset");
    assert_eq!(cv.as_i64(), 0);
    assert!(!q.as_bool());
}

#[test]
fn ctu_requires_an_edge_input() {
    let pv = Value::from(3_i16);
    let mut cv = Value::from(0_i16);
    let mut q = Value::null();
    assert_eq!(
        ctu(&mut q, &Value::from(true), &Value::from(false), &pv, &mut cv),
        Err(IecError::NotAllowedType)
    );
    assert_eq!(cv.as_i64(), 0);
}

#[test]
fn ctd_loads_and_counts_down() {
    let pv = Value::from(2_i16);
    let mut cv = Value::from(0_i16);
    let mut q = Value::null();

    ctd(&mut q, &edge(false), &Value::from(true), &pv, &mut cv).expect("load");
    assert_eq!(cv.as_i64(), 2);
    assert!(!q.as_bool());

    let mut counts = Vec::new();
    for _ in 0..3 {
        ctd(&mut q, &edge(true), &Value::from(false), &pv, &mut cv).expect("ctd");
        counts.push(cv.as_i64());
    }
    assert_eq!(counts, [1, 0, 0]);
    assert!(q.as_bool());
}

struct Bench {
    clock: ManualClock,
    timer: Value,
    pt: Value,
    et: Value,
}

impl Bench {
    fn new(preset: i64) -> Self {
        Self {
            clock: ManualClock::new(),
            timer: Value::new(IecType::Timer),
            pt: Value::from(ms(preset)),
            et: Value::new(IecType::Time),
        }
    }

    fn q(&self) -> bool {
        self.timer.timer().is_some_and(|state| state.q)
    }

    fn et(&self) -> Duration {
        self.et.as_duration().unwrap_or(Duration::ZERO)
    }
}

#[test]
fn ton_delays_rising_edge() {
    let mut b = Bench::new(100);
    let step = |b: &mut Bench, at: i64, input: bool| {
        b.clock.set_time(ms(at));
        ton(&mut b.timer, &Value::from(input), &b.pt, Some(&mut b.et), &b.clock).expect("ton");
        (b.q(), b.et())
    };

    assert_eq!(step(&mut b, 0, true), (false, ms(0)));
    assert_eq!(step(&mut b, 50, true), (false, ms(50)));
    assert_eq!(step(&mut b, 100, true), (true, ms(100)));
    assert_eq!(step(&mut b, 150, true), (true, ms(100)));
    assert_eq!(step(&mut b, 160, false), (false, ms(0)));
    assert_eq!(step(&mut b, 170, true), (false, ms(0)));
    assert_eq!(step(&mut b, 260, true), (false, ms(90)));
}

#[test]
fn tp_emits_fixed_pulse() {
    let mut b = Bench::new(100);
    let step = |b: &mut Bench, at: i64, input: bool| {
        b.clock.set_time(ms(at));
        tp(&mut b.timer, &Value::from(input), &b.pt, Some(&mut b.et), &b.clock).expect("tp");
        (b.q(), b.et())
    };

    assert_eq!(step(&mut b, 0, true), (false, ms(0)));
    assert_eq!(step(&mut b, 30, false), (true, ms(30)));
    assert_eq!(step(&mut b, 99, false), (true, ms(99)));
    assert_eq!(step(&mut b, 100, true), (false, ms(100)));
    assert_eq!(step(&mut b, 150, true), (false, ms(100)));
    assert_eq!(step(&mut b, 160, false), (false, ms(0)));
    assert_eq!(step(&mut b, 200, true), (false, ms(0)));
    assert_eq!(step(&mut b, 210, true), (true, ms(10)));
}

#[test]
fn tp_retriggers_after_preset_raised_mid_hold() {
    let mut b = Bench::new(100);
    let step = |b: &mut Bench, at: i64, input: bool| {
        b.clock.set_time(ms(at));
        tp(&mut b.timer, &Value::from(input), &b.pt, Some(&mut b.et), &b.clock).expect("tp");
        (b.q(), b.et())
    };

    step(&mut b, 0, true);
    assert_eq!(step(&mut b, 100, true), (false, ms(100)));
    b.pt = Value::from(ms(200));
    assert_eq!(step(&mut b, 110, true), (false, ms(100)));
    assert_eq!(step(&mut b, 120, false), (false, ms(0)));
    assert_eq!(step(&mut b, 130, true), (false, ms(0)));
    assert_eq!(step(&mut b, 180, true), (true, ms(50)));
    assert_eq!(step(&mut b, 330, false), (false, ms(0)));
}

#[test]
fn tof_delays_falling_edge() {
    let mut b = Bench::new(100);
    let step = |b: &mut Bench, at: i64, input: bool| {
        b.clock.set_time(ms(at));
        tof(&mut b.timer, &Value::from(input), &b.pt, Some(&mut b.et), &b.clock).expect("tof");
        (b.q(), b.et())
    };

    assert_eq!(step(&mut b, 0, false), (false, ms(0)));
    assert_eq!(step(&mut b, 5, true), (true, ms(0)));
    assert_eq!(step(&mut b, 10, false), (true, ms(0)));
    assert_eq!(step(&mut b, 60, false), (true, ms(50)));
    assert_eq!(step(&mut b, 110, false), (false, ms(100)));
    assert_eq!(step(&mut b, 200, false), (false, ms(100)));
    assert_eq!(step(&mut b, 210, true), (true, ms(0)));
}

#[test]
fn timer_without_et_output() {
    let clock = ManualClock::new();
    let mut timer = Value::new(IecType::Timer);
    let pt = Value::from(ms(10));
    ton(&mut timer, &Value::from(true), &pt, None, &clock).expect("ton");
    clock.advance(ms(10));
    ton(&mut timer, &Value::from(true), &pt, None, &clock).expect("ton");
    assert!(timer.timer().is_some_and(|state| state.q));
}

#[test]
fn timer_validation_happens_before_mutation() {
    let clock = ManualClock::new();
    let pt = Value::from(ms(10));
    let mut timer = Value::new(IecType::Timer);

    assert_eq!(
        ton(&mut timer, &Value::from(1_i16), &pt, None, &clock),
        Err(IecError::NotAllowedType)
    );
    assert_eq!(timer, Value::new(IecType::Timer));

    let mut not_a_timer = Value::from(0_i32);
    assert_eq!(
        tp(&mut not_a_timer, &Value::from(true), &pt, None, &clock),
        Err(IecError::NotAllowedType)
    );

    let mut bad_et = Value::from(0_i32);
    assert_eq!(
        tof(&mut timer, &Value::from(true), &pt, Some(&mut bad_et), &clock),
        Err(IecError::NotAllowedType)
    );
    assert_eq!(
        ton(&mut timer, &Value::from(true), &Value::from(10_i32), None, &clock),
        Err(IecError::NotAllowedType)
    );
}
