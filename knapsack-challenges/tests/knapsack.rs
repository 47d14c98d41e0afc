use knapsack_challenges::{Challenge, Solution, Track};
use knapsack_utils::{dejsonify, jsonify};

#[test]
fn test_default_capacity() {
    assert_eq!(Track::new(10).capacity().unwrap(), 250);
    assert_eq!(Track::new(3).capacity().unwrap(), 75);
    let track = Track {
        num_items: 5,
        max_value: 7,
        capacity: None,
    };
    // ceil(35 / 4)
    assert_eq!(track.capacity().unwrap(), 9);
    let track = Track {
        capacity: Some(12),
        ..track
    };
    assert_eq!(track.capacity().unwrap(), 12);
}

#[test]
fn test_generate_instance() {
    let track = Track {
        num_items: 50,
        max_value: 20,
        capacity: None,
    };
    let challenge = Challenge::generate_instance(&[7u8; 32], &track).unwrap();
    assert_eq!(challenge.num_items(), 50);
    assert_eq!(challenge.weights().len(), 50);
    assert_eq!(challenge.values().len(), 50);
    assert_eq!(challenge.max_weight(), 250);
    assert!(challenge.weights().iter().all(|&w| (1..=20).contains(&w)));
    assert!(challenge.values().iter().all(|&v| (1..=20).contains(&v)));
}

#[test]
fn test_generate_instance_is_seeded() {
    let track = Track::new(25);
    let a = Challenge::generate_instance(&[1u8; 32], &track).unwrap();
    let b = Challenge::generate_instance(&[1u8; 32], &track).unwrap();
    let c = Challenge::generate_instance(&[2u8; 32], &track).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_generate_instance_rejects_zero_max_value() {
    let track = Track {
        num_items: 4,
        max_value: 0,
        capacity: Some(10),
    };
    assert!(Challenge::generate_instance(&[0u8; 32], &track).is_err());
}

#[test]
fn test_generate_empty_instance() {
    let challenge = Challenge::generate_instance(&[0u8; 32], &Track::new(0)).unwrap();
    assert_eq!(challenge.num_items(), 0);
    assert_eq!(challenge.max_weight(), 0);
    assert_eq!(challenge.items().count(), 0);
}

#[test]
fn test_new_validates_items() {
    assert!(Challenge::new(vec![1, 2], vec![3], 5).is_err());
    assert!(Challenge::new(vec![1, 0], vec![3, 4], 5).is_err());
    assert!(Challenge::new(vec![1, 2], vec![0, 4], 5).is_err());
    assert!(Challenge::new(vec![u32::MAX, 1], vec![1, 1], 5).is_err());
    assert!(Challenge::new(vec![1, 1], vec![u32::MAX, 1], 5).is_err());
    assert!(Challenge::new(vec![], vec![], 0).is_ok());
}

#[test]
fn test_items() {
    let challenge = Challenge::new(vec![2, 3, 4], vec![3, 4, 5], 5).unwrap();
    let items: Vec<_> = challenge.items().collect();
    assert_eq!(items, vec![(0, 2, 3), (1, 3, 4), (2, 4, 5)]);
    // callable repeatedly
    assert_eq!(challenge.items().collect::<Vec<_>>(), items);
}

#[test]
fn test_evaluate_total_value() {
    let challenge = Challenge::new(vec![2, 3, 4], vec![3, 4, 5], 5).unwrap();
    assert_eq!(
        challenge
            .evaluate_total_value(&Solution { items: vec![0, 1] })
            .unwrap(),
        7
    );
    assert_eq!(challenge.evaluate_total_value(&Solution::default()).unwrap(), 0);
    assert_eq!(challenge.total_weight(&Solution { items: vec![1, 0] }), 5);
}

#[test]
fn test_evaluate_total_value_rejects_invalid() {
    let challenge = Challenge::new(vec![2, 3, 4], vec![3, 4, 5], 5).unwrap();
    let overweight = challenge.evaluate_total_value(&Solution { items: vec![0, 2] });
    assert_eq!(
        overweight.unwrap_err().to_string(),
        "Total weight (6) exceeded max weight (5)"
    );
    assert!(challenge
        .evaluate_total_value(&Solution { items: vec![1, 1] })
        .is_err());
    assert!(challenge
        .evaluate_total_value(&Solution { items: vec![3] })
        .is_err());
}

#[test]
fn test_solution_from_sorts() {
    assert_eq!(Solution::from(vec![3, 0, 2]).items, vec![0, 2, 3]);
}

#[test]
fn test_deserialize_round_trip() {
    let challenge = Challenge::new(vec![2, 3, 4], vec![3, 4, 5], 5).unwrap();
    let json = jsonify(&challenge).unwrap();
    assert_eq!(json, r#"{"max_weight":5,"values":[3,4,5],"weights":[2,3,4]}"#);
    assert_eq!(dejsonify::<Challenge>(&json).unwrap(), challenge);
}

#[test]
fn test_deserialize_validates_items() {
    // mismatched lengths
    assert!(dejsonify::<Challenge>(r#"{"weights":[1,2],"values":[1],"max_weight":5}"#).is_err());
    // zero weight
    assert!(dejsonify::<Challenge>(r#"{"weights":[0,1],"values":[1,1],"max_weight":5}"#).is_err());
    // zero value
    assert!(dejsonify::<Challenge>(r#"{"weights":[1,1],"values":[1,0],"max_weight":5}"#).is_err());
    // total value overflows u32
    assert!(dejsonify::<Challenge>(
        r#"{"weights":[1,1],"values":[4294967295,1],"max_weight":5}"#
    )
    .is_err());
}

#[test]
fn test_deserialize_derives_num_items_from_arrays() {
    let challenge =
        dejsonify::<Challenge>(r#"{"num_items":3,"weights":[1],"values":[1],"max_weight":5}"#)
            .unwrap();
    assert_eq!(challenge.num_items(), 1);
    assert_eq!(challenge.items().count(), 1);
}

#[test]
fn test_default_solution_is_empty() {
    assert!(Solution::default().items.is_empty());
}
