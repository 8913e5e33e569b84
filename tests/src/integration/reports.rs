//! # Status Report Aggregation
//!
//! Report aggregation over random subsets of runner classes, and the
//! consistency of the runner class registry.

#[cfg(test)]
mod tests {
    use nightskycam_serialization::status::{
        get_runner_status_dict_class, random_entries, RunnerClass, RunnerEntries,
        NIGHTSKYCAM_RUNNERS,
    };
    use nightskycam_serialization::{
        get_random_status_dict, get_status_entries_report, has_runner_status_dict,
        has_status_entries_report_function,
    };
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeMap;

    fn random_instances(rng: &mut StdRng) -> BTreeMap<RunnerClass, RunnerEntries> {
        let count = rng.gen_range(0..=RunnerClass::ALL.len());
        RunnerClass::ALL
            .choose_multiple(rng, count)
            .copied()
            .collect::<Vec<_>>()
            .into_iter()
            .map(|class| (class, random_entries(class, rng).unwrap()))
            .collect()
    }

    #[test]
    fn test_registry_bijection() {
        for class in RunnerClass::ALL {
            assert!(NIGHTSKYCAM_RUNNERS.contains(&class.as_str()));
            assert!(has_runner_status_dict(class.as_str()));
            let row = get_runner_status_dict_class(class.as_str()).unwrap();
            assert_eq!(row.runner_class, class);
        }
        for name in NIGHTSKYCAM_RUNNERS {
            let class: RunnerClass = name.parse().unwrap();
            assert!(RunnerClass::ALL.contains(&class));
        }
    }

    #[test]
    fn test_report_function_policy() {
        for name in [
            "CamRunner",
            "CommandRunner",
            "FtpRunner",
            "LocationInfoRunner",
            "SleepyPiRunner",
            "SpaceKeeperRunner",
        ] {
            assert!(has_status_entries_report_function(name));
        }
        assert!(!has_status_entries_report_function("StatusRunner"));
        assert!(!has_status_entries_report_function("ConfigRunner"));
    }

    #[test]
    fn test_single_runner_reports() {
        for name in NIGHTSKYCAM_RUNNERS {
            for _ in 0..5 {
                let entries = get_random_status_dict(name).unwrap();
                assert!(!entries.is_empty());
                let report = get_status_entries_report([&entries]);
                assert_eq!(
                    report.is_empty(),
                    !has_status_entries_report_function(name),
                    "{name}"
                );
            }
        }
    }

    #[test]
    fn test_random_subsets() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let instances = random_instances(&mut rng);
            let report = get_status_entries_report(instances.values());

            let any_report = instances
                .keys()
                .any(|class| has_status_entries_report_function(class.as_str()));
            assert_eq!(!report.is_empty(), any_report, "{:?}", instances.keys());
        }
    }

    #[test]
    fn test_reportless_classes_add_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let ftp = random_entries(RunnerClass::FtpRunner, &mut rng).unwrap();
        let status = random_entries(RunnerClass::StatusRunner, &mut rng).unwrap();
        let config = random_entries(RunnerClass::ConfigRunner, &mut rng).unwrap();

        assert_eq!(
            get_status_entries_report([&ftp, &status, &config]),
            get_status_entries_report([&ftp])
        );
    }
}
