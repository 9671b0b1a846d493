use crate::*;

#[test]
fn bustup_key_orders_lexicographically() {
    let mut keys = vec![
        BustupKey::new(2, 0, 0),
        BustupKey::new(1, 5, 0),
        BustupKey::new(1, 0, 9),
        BustupKey::new(1, 0, 1),
    ];
    keys.sort();
    assert_eq!(
        keys,
        vec![
            BustupKey::new(1, 0, 1),
            BustupKey::new(1, 0, 9),
            BustupKey::new(1, 5, 0),
            BustupKey::new(2, 0, 0),
        ]
    );
}

#[test]
fn assist_key_orders_lexicographically() {
    assert!(AssistKey::new(1, 9) < AssistKey::new(2, 0));
    assert!(AssistKey::new(3, 1) < AssistKey::new(3, 2));
}

#[test]
fn display_uses_sprite_names() {
    let rec = BustupRecord::new(BustupKey::new(1, 2, 3), 4);
    assert_eq!(rec.to_string(), "b_0001_002_03 -> type 04");

    let assist = AssistRecord {
        base_pos: Vec2::new(1.5, -2.0),
        ..AssistRecord::new(AssistKey::new(10, 1), 12)
    };
    assert_eq!(
        assist.to_string(),
        "b_0010_001 -> type 12 (Base:(1.5, -2) Eye:(0, 0) Mouth:(0, 0))"
    );
}

#[test]
fn values_equal_compares_every_field() {
    let a = BustupRecord::new(BustupKey::new(1, 0, 0), 2);

    let mut b = a;
    assert!(a.values_equal(&b));

    b.align3 = 1;
    assert!(!a.values_equal(&b));

    let mut c = a;
    c.mouth_pos.y = 0.1;
    assert!(!a.values_equal(&c));

    let d = BustupRecord::new(BustupKey::new(1, 0, 1), 2);
    assert!(!a.values_equal(&d));
}

#[test]
fn values_equal_is_numeric_for_floats() {
    let mut a = AssistRecord::new(AssistKey::new(1, 1), 0);
    let mut b = a;
    a.eye_pos.x = 0.0;
    b.eye_pos.x = -0.0;
    assert!(a.values_equal(&b));

    a.eye_pos.x = f32::NAN;
    b.eye_pos.x = f32::NAN;
    assert!(!a.values_equal(&b));
}

#[test]
fn key_matches_fields() {
    let rec = BustupRecord::new(BustupKey::new(7, 8, 9), 0);
    assert_eq!(rec.key(), BustupKey::new(7, 8, 9));
    assert_eq!(rec.major_id, 7);
    assert_eq!(rec.sub_id, 9);
}
