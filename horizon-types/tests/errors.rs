use horizon_types::HorizonError;

#[test]
fn inference_errors_are_input_errors() {
    assert!(HorizonError::Inference("single timestamp".into()).is_input_error());
    assert!(HorizonError::missing_column("date").is_input_error());
    assert!(HorizonError::column_type("date", "timestamp", "i64").is_input_error());
    assert!(!HorizonError::Data("ragged".into()).is_input_error());
    assert!(!HorizonError::ThreadPool("boom".into()).is_input_error());
}

#[test]
fn group_errors_classify_by_source() {
    let inner = HorizonError::Inference("need at least 2 timestamps".into());
    let wrapped = HorizonError::group("[id=A]", inner.clone());
    assert!(wrapped.is_input_error());
    assert_eq!(wrapped.root_cause(), &inner);

    let nested = HorizonError::group("[id=B]", HorizonError::Data("x".into()));
    assert!(!nested.is_input_error());
}

#[test]
fn errors_roundtrip_through_json() {
    let err = HorizonError::group("[id=A]", HorizonError::parse("2021-13-01", "month out of range"));
    let json = serde_json::to_string(&err).expect("serialize error");
    let de: HorizonError = serde_json::from_str(&json).expect("deserialize error");
    assert_eq!(de, err);
}

#[test]
fn messages_name_the_violated_constraint() {
    let err = HorizonError::column_type("date", "timestamp", "utf8");
    assert_eq!(err.to_string(), "column 'date' has type utf8, expected timestamp");
    let err = HorizonError::missing_column("when");
    assert_eq!(err.to_string(), "missing column: when");
}
