//! # Integration Test Flows
//!
//! A nightskycam system and the server exchanging messages over an opaque
//! transport (here: plain strings handed from one side to the other).
//!
//! ## Flows Tested:
//!
//! 1. **Server → System**: remote command, then its result sent back
//! 2. **Server → System**: configuration update with unset options
//! 3. **System → Server**: status of every runner, summarized server side
//! 4. **Authentication**: every channel rejects a foreign token

#[cfg(test)]
mod tests {
    use nightskycam_serialization::status::{
        get_introspection_dict, random_entries, RunnerClass, RunnerEntries,
    };
    use nightskycam_serialization::{
        deserialize_command, deserialize_command_result, deserialize_config_update,
        deserialize_status, get_status_entries_report, serialize_command,
        serialize_command_result, serialize_config_update, serialize_status, CodecConfig,
        CommandResult, Envelope, MessageCodec, SerializationError, StatusDict,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::{json, Value};

    const TOKEN: &str = "nightskycam-shared-secret";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Status of a runner named after its class, as a system reports it.
    fn runner_status(entries: &RunnerEntries) -> StatusDict {
        StatusDict {
            name: entries.runner_class().to_string(),
            entries: entries.to_entries(),
            activity: "running iteration".to_string(),
            state: "running".to_string(),
            running_for: "2 hours 1 minute".to_string(),
        }
    }

    fn config(value: Value) -> Envelope {
        match value {
            Value::Object(map) => map,
            _ => panic!("not a mapping"),
        }
    }

    // =============================================================================
    // COMMANDS
    // =============================================================================

    #[test]
    fn test_command_flow() {
        // server side
        let request = serialize_command(31, "df -h", Some(TOKEN));

        // system side
        let (command_id, command) = deserialize_command(&request, Some(TOKEN)).unwrap();
        let result = CommandResult::new(command_id, command, "/dev/sda1 12G", "", "0", "");
        let response = serialize_command_result(&result, Some(TOKEN));

        // server side
        let received = deserialize_command_result(&response, Some(TOKEN)).unwrap();
        assert_eq!(received, result);
        assert_eq!(received.command_id, 31);
        assert_eq!(received.command, "df -h");
    }

    #[test]
    fn test_command_failure_reported() {
        let result = CommandResult::new(2, "foo", "", "foo: not found", "127", "");
        let response = serialize_command_result(&result, None);
        assert_eq!(deserialize_command_result(&response, None).unwrap(), result);
    }

    // =============================================================================
    // CONFIGURATION
    // =============================================================================

    #[test]
    fn test_config_flow() {
        let server = MessageCodec::new(CodecConfig::with_token(TOKEN));
        let update = config(json!({"frequency": 5, "folder": "/data", "time_window": null}));

        let message = serialize_config_update("CamRunner", &update, server.token());
        let (runner, received) = deserialize_config_update(&message, server.token()).unwrap();

        assert_eq!(runner, "CamRunner");
        assert_eq!(received, update);
        assert_eq!(received["time_window"], Value::Null);
    }

    #[test]
    fn test_config_scenario() {
        let update = config(json!({"A": "a", "B": null, "C": 0.1}));
        let message = serialize_config_update("myrunner", &update, None);
        let (runner, received) = deserialize_config_update(&message, None).unwrap();
        assert_eq!(runner, "myrunner");
        assert_eq!(received["A"], json!("a"));
        assert_eq!(received["B"], Value::Null);
        assert_eq!(received["C"], json!(0.1));
    }

    // =============================================================================
    // STATUS
    // =============================================================================

    #[test]
    fn test_status_flow() {
        let mut rng = StdRng::seed_from_u64(2024);

        // system side: one status per runner class
        let all_entries: Vec<RunnerEntries> = RunnerClass::ALL
            .into_iter()
            .map(|class| random_entries(class, &mut rng).unwrap())
            .collect();
        let statuses: Vec<StatusDict> = all_entries.iter().map(runner_status).collect();
        let message = serialize_status("nightskycam5", &statuses, Some(TOKEN));

        // server side
        let (system, received) = deserialize_status(&message, Some(TOKEN)).unwrap();
        assert_eq!(system, "nightskycam5");
        assert_eq!(received.len(), RunnerClass::ALL.len());

        let typed: Vec<RunnerEntries> = received
            .values()
            .map(|status| {
                let class: RunnerClass = status.name.parse().unwrap();
                status.runner_entries(class).unwrap()
            })
            .collect();
        for entries in &all_entries {
            assert!(typed.contains(entries));
        }

        let report = get_status_entries_report(&typed);
        assert_eq!(report, get_status_entries_report(&all_entries));
        assert!(!report.is_empty());

        let intro = get_introspection_dict(&typed);
        assert!(intro.cpu_temperature.is_some());
        assert!(intro.upload_speed.is_some());
        assert!(intro.free_space.is_some());
    }

    #[test]
    fn test_status_scenario() {
        let status1 = StatusDict {
            name: "status1".to_string(),
            entries: config(json!({"E11": "e11", "E12": "e12"})),
            activity: "taking picture".to_string(),
            state: "running".to_string(),
            running_for: "3 minutes 4 seconds".to_string(),
        };
        let status2 = StatusDict {
            name: "status2".to_string(),
            entries: config(json!({"E2": "e2"})),
            activity: "waiting".to_string(),
            state: "sleeping".to_string(),
            running_for: "12 minutes 5 seconds".to_string(),
        };

        let message = serialize_status("sys", [&status1, &status2], None);
        let (system, received) = deserialize_status(&message, None).unwrap();

        assert_eq!(system, "sys");
        assert_eq!(received.len(), 2);
        assert_eq!(received["status1"], status1);
        assert_eq!(received["status2"], status2);
    }

    // =============================================================================
    // AUTHENTICATION
    // =============================================================================

    #[test]
    fn test_foreign_token_rejected_on_every_channel() {
        let foreign = Some("someone-else");

        let command = serialize_command(1, "ls", Some(TOKEN));
        assert_eq!(
            deserialize_command(&command, foreign),
            Err(SerializationError::IncorrectToken)
        );

        let result = serialize_command_result(
            &CommandResult::new(1, "ls", "", "", "0", ""),
            Some(TOKEN),
        );
        assert_eq!(
            deserialize_command_result(&result, foreign),
            Err(SerializationError::IncorrectToken)
        );

        let update = serialize_config_update("FtpRunner", &Envelope::new(), Some(TOKEN));
        assert_eq!(
            deserialize_config_update(&update, foreign),
            Err(SerializationError::IncorrectToken)
        );

        let status = serialize_status("sys", std::iter::empty::<&StatusDict>(), Some(TOKEN));
        assert_eq!(
            deserialize_status(&status, foreign),
            Err(SerializationError::IncorrectToken)
        );
    }

    #[test]
    fn test_unverified_reader() {
        // a reader without the secret can still decode
        let message = serialize_command(9, "uptime", Some(TOKEN));
        assert_eq!(
            deserialize_command(&message, None).unwrap(),
            (9, "uptime".to_string())
        );
    }

    #[test]
    fn test_strict_server_rejects_unsigned() {
        let server = MessageCodec::new(CodecConfig::with_token(TOKEN).requiring_signature());
        let unsigned = serialize_command(9, "uptime", None);
        assert_eq!(
            server.deserialize(&unsigned, &["command_id", "command"]),
            Err(SerializationError::IncorrectToken)
        );
    }

    #[test]
    fn test_channels_do_not_mix() {
        let command = serialize_command(1, "ls", None);
        assert!(matches!(
            deserialize_status(&command, None),
            Err(SerializationError::ImproperMessage(_))
        ));
        assert!(matches!(
            deserialize_config_update(&command, None),
            Err(SerializationError::ImproperMessage(_))
        ));
    }
}
