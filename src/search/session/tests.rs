use std::collections::BTreeSet;
use std::fs;
use std::thread;

use tempfile::{TempDir, tempdir};

use super::*;

fn touch(path: &Path) {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).unwrap();
	}
	fs::write(path, b"").unwrap();
}

fn report_tree() -> TempDir {
	let dir = tempdir().unwrap();
	for name in ["report.TXT", "report_final.txt", "image.png"] {
		touch(&dir.path().join(name));
	}
	dir
}

fn run_collect(session: SearchSession) -> (SessionSummary, Vec<SearchEvent>) {
	let (tx, rx) = mpsc::channel();
	let summary = session.run(&tx);
	drop(tx);
	(summary, rx.iter().collect())
}

fn matches(events: &[SearchEvent]) -> BTreeSet<PathBuf> {
	events
		.iter()
		.filter_map(|event| match event {
			SearchEvent::Match(path) => Some(path.clone()),
			_ => None,
		})
		.collect()
}

fn finished(events: &[SearchEvent]) -> Vec<SessionSummary> {
	events
		.iter()
		.filter_map(|event| match event {
			SearchEvent::Finished(summary) => Some(*summary),
			_ => None,
		})
		.collect()
}

fn errors(events: &[SearchEvent]) -> Vec<String> {
	events
		.iter()
		.filter_map(|event| match event {
			SearchEvent::Error(message) => Some(message.clone()),
			_ => None,
		})
		.collect()
}

#[test]
fn explicit_root_run_streams_matches_and_lifecycle() {
	let dir = report_tree();
	let config = SearchConfig::builder("report")
		.start_path(dir.path())
		.case_insensitive(true)
		.build()
		.unwrap();

	let (summary, events) = run_collect(SearchSession::new(config));

	assert_eq!(summary.outcome, SessionOutcome::Completed);
	assert_eq!(summary.found, 2);
	assert_eq!(summary.scanned, 3);
	assert_eq!(
		matches(&events),
		BTreeSet::from([dir.path().join("report.TXT"), dir.path().join("report_final.txt")])
	);
	assert_eq!(finished(&events), vec![summary]);
	assert!(matches!(events.last(), Some(SearchEvent::Finished(_))));

	let root = std::path::absolute(dir.path()).unwrap();
	let details: Vec<_> = events
		.iter()
		.filter_map(|event| match event {
			SearchEvent::ProgressDetail {
				scanned,
				current_root,
			} => Some((*scanned, current_root.clone())),
			_ => None,
		})
		.collect();
	assert_eq!(
		details,
		vec![(0, Some(root.clone())), (3, Some(root)), (3, None)]
	);

	assert!(events.contains(&SearchEvent::Progress("Search completed.".to_string())));
}

#[test]
fn zero_roots_finishes_immediately_with_an_error() {
	let config = SearchConfig::builder("report").build().unwrap();
	let session = SearchSession::new(config).with_root_source(Vec::<PathBuf>::new());

	let (summary, events) = run_collect(session);

	assert_eq!(summary.found, 0);
	assert_eq!(summary.outcome, SessionOutcome::Rejected);
	assert_eq!(errors(&events).len(), 1);
	assert_eq!(finished(&events).len(), 1);
	assert!(matches!(events.last(), Some(SearchEvent::Finished(_))));
}

#[test]
fn missing_start_path_is_rejected() {
	let dir = tempdir().unwrap();
	let config = SearchConfig::builder("report")
		.start_path(dir.path().join("nope"))
		.build()
		.unwrap();

	let (summary, events) = run_collect(SearchSession::new(config));

	assert_eq!(summary.outcome, SessionOutcome::Rejected);
	let errors = errors(&events);
	assert_eq!(errors.len(), 1);
	assert!(errors[0].contains("does not exist"));
	assert_eq!(finished(&events).len(), 1);
}

#[test]
fn file_start_path_is_rejected() {
	let dir = report_tree();
	let config = SearchConfig::builder("report")
		.start_path(dir.path().join("image.png"))
		.build()
		.unwrap();

	let (summary, events) = run_collect(SearchSession::new(config));

	assert_eq!(summary.outcome, SessionOutcome::Rejected);
	assert!(errors(&events)[0].contains("not a directory"));
	assert!(matches(&events).is_empty());
}

#[test]
fn invalid_exclude_is_rejected() {
	let dir = report_tree();
	let config = SearchConfig::builder("report")
		.start_path(dir.path())
		.excludes(["["])
		.build()
		.unwrap();

	let (summary, events) = run_collect(SearchSession::new(config));

	assert_eq!(summary.outcome, SessionOutcome::Rejected);
	assert_eq!(errors(&events).len(), 1);
}

#[test]
fn relative_start_path_resolves_to_absolute() {
	let config = SearchConfig::builder("x").start_path(".").build().unwrap();
	let (tx, _rx) = mpsc::channel();
	let control = ControlChannel::new();
	let mut reporter = Reporter::new(&tx, &control);

	let roots = resolve_roots(&config, &Vec::<PathBuf>::new(), &mut reporter).unwrap();

	assert_eq!(roots.len(), 1);
	assert!(roots[0].is_absolute());
}

#[test]
fn all_roots_mode_searches_each_root_in_order() {
	let first = report_tree();
	let second = tempdir().unwrap();
	touch(&second.path().join("deep/report_copy.txt"));

	let config = SearchConfig::builder("report").build().unwrap();
	let session = SearchSession::new(config)
		.with_root_source(vec![first.path().to_path_buf(), second.path().to_path_buf()]);

	let (summary, events) = run_collect(session);

	assert_eq!(summary.outcome, SessionOutcome::Completed);
	assert_eq!(summary.found, 3);
	assert_eq!(summary.scanned, 5);

	let searched: Vec<_> = events
		.iter()
		.filter_map(|event| match event {
			SearchEvent::Progress(text) if text.starts_with("Searching ") => Some(text.clone()),
			_ => None,
		})
		.collect();
	assert_eq!(searched.len(), 2);
	assert!(searched[0].contains(&first.path().display().to_string()));
	assert!(searched[1].contains(&second.path().display().to_string()));
}

#[test]
fn cancel_before_start_skips_every_root() {
	let dir = report_tree();
	let config = SearchConfig::builder("report")
		.start_path(dir.path())
		.build()
		.unwrap();
	let session = SearchSession::new(config);
	session.control().request_cancel();

	let (summary, events) = run_collect(session);

	assert_eq!(summary.outcome, SessionOutcome::Cancelled);
	assert_eq!(summary.scanned, 0);
	assert!(events.contains(&SearchEvent::Progress("Search cancelled.".to_string())));
	assert!(
		!events
			.iter()
			.any(|event| matches!(event, SearchEvent::Progress(text) if text.starts_with("Searching")))
	);
	assert_eq!(finished(&events).len(), 1);
}

#[test]
fn transcript_records_matches_and_summary() {
	let dir = report_tree();
	let out = tempdir().unwrap();
	let transcript = out.path().join("results.txt");
	let config = SearchConfig::builder("report")
		.start_path(dir.path())
		.case_insensitive(true)
		.output_file(&transcript)
		.build()
		.unwrap();

	let (summary, _) = run_collect(SearchSession::new(config));
	assert_eq!(summary.found, 2);

	let text = fs::read_to_string(&transcript).unwrap();
	assert!(text.contains("Search term: 'report'"));
	assert!(text.contains("report_final.txt"));
	assert!(text.contains("report.TXT"));
	assert!(text.contains("Search complete. Found 2 file(s)."));
	assert!(text.contains("Scanned 3 item(s)."));
}

#[test]
fn unopenable_transcript_does_not_stop_the_search() {
	let dir = report_tree();
	let config = SearchConfig::builder("report")
		.start_path(dir.path())
		.case_insensitive(true)
		.output_file(dir.path().join("missing/results.txt"))
		.build()
		.unwrap();

	let (summary, events) = run_collect(SearchSession::new(config));

	assert_eq!(summary.outcome, SessionOutcome::Completed);
	assert_eq!(summary.found, 2);
	assert_eq!(errors(&events).len(), 1);
	assert_eq!(matches(&events).len(), 2);
}

#[test]
fn dropped_receiver_cancels_the_run() {
	let dir = report_tree();
	let config = SearchConfig::builder("report")
		.start_path(dir.path())
		.build()
		.unwrap();
	let (tx, rx) = mpsc::channel();
	drop(rx);

	let summary = SearchSession::new(config).run(&tx);

	assert_eq!(summary.outcome, SessionOutcome::Cancelled);
	assert_eq!(summary.scanned, 0);
}

#[test]
fn repeated_runs_report_identical_matches() {
	let dir = report_tree();
	touch(&dir.path().join("sub/report_2.txt"));
	let config = SearchConfig::builder("report")
		.start_path(dir.path())
		.case_insensitive(true)
		.build()
		.unwrap();

	let (first_summary, first) = run_collect(SearchSession::new(config.clone()));
	let (second_summary, second) = run_collect(SearchSession::new(config));

	assert_eq!(matches(&first), matches(&second));
	assert_eq!(first_summary.found, second_summary.found);
	assert_eq!(first_summary.scanned, second_summary.scanned);
}

#[test]
fn paused_worker_makes_no_progress_until_cancelled() {
	let dir = report_tree();
	let config = SearchConfig::builder("report")
		.start_path(dir.path())
		.case_insensitive(true)
		.build()
		.unwrap();
	let session = SearchSession::new(config);
	session.control().request_pause();

	let handle = session.spawn().unwrap();
	thread::sleep(Duration::from_millis(100));
	assert_eq!(handle.progress(), ProgressSnapshot::default());
	assert!(!handle.is_finished());

	handle.cancel();
	let events: Vec<_> = handle.events().iter().collect();
	let summary = handle.join().unwrap();

	assert_eq!(summary.outcome, SessionOutcome::Cancelled);
	assert_eq!(summary.found, 0);
	assert!(matches(&events).is_empty());
	assert_eq!(finished(&events), vec![summary]);
}

#[test]
fn pause_and_resume_reaches_the_unpaused_totals() {
	let dir = report_tree();
	touch(&dir.path().join("nested/report_3.txt"));
	let config = SearchConfig::builder("report")
		.start_path(dir.path())
		.case_insensitive(true)
		.build()
		.unwrap();
	let (baseline, baseline_events) = run_collect(SearchSession::new(config.clone()));

	let session = SearchSession::new(config);
	session.control().request_pause();
	let handle = session.spawn().unwrap();
	thread::sleep(Duration::from_millis(50));
	assert_eq!(handle.progress().scanned, 0);

	handle.resume();
	let events: Vec<_> = handle.events().iter().collect();
	let summary = handle.join().unwrap();

	assert_eq!(summary.outcome, SessionOutcome::Completed);
	assert_eq!(summary.found, baseline.found);
	assert_eq!(summary.scanned, baseline.scanned);
	assert_eq!(matches(&events), matches(&baseline_events));
}

#[test]
fn cancel_with_grace_stops_a_parked_worker() {
	let dir = report_tree();
	let config = SearchConfig::builder("report")
		.start_path(dir.path())
		.build()
		.unwrap();
	let session = SearchSession::new(config);
	session.control().request_pause();
	let handle = session.spawn().unwrap();

	let summary = handle
		.cancel_with_grace(Duration::from_secs(5))
		.expect("worker stops within the grace period");
	assert_eq!(summary.outcome, SessionOutcome::Cancelled);
}

#[test]
fn dropping_a_running_handle_cancels_it() {
	let dir = report_tree();
	let config = SearchConfig::builder("report")
		.start_path(dir.path())
		.build()
		.unwrap();
	let session = SearchSession::new(config);
	let control = session.control();
	control.request_pause();

	let handle = session.spawn().unwrap();
	drop(handle);

	assert!(control.is_cancelled());
}

#[test]
fn cancel_during_first_root_never_starts_the_next() {
	let first = report_tree();
	for index in 0..20 {
		touch(&first.path().join(format!("more/report_{index}.txt")));
	}
	let second = report_tree();
	let second_root = second.path().to_path_buf();

	let config = SearchConfig::builder("report").build().unwrap();
	let session = SearchSession::new(config)
		.with_root_source(vec![first.path().to_path_buf(), second_root.clone()]);
	// Parks the worker at the first checkpoint inside the first root.
	session.control().request_pause();
	let handle = session.spawn().unwrap();

	let mut events = Vec::new();
	for event in handle.events() {
		let started_first = matches!(
			&event,
			SearchEvent::ProgressDetail { current_root: Some(root), .. } if root == first.path()
		);
		events.push(event);
		if started_first {
			handle.cancel();
			break;
		}
	}
	events.extend(handle.events().iter());
	let summary = handle.join().unwrap();

	assert_eq!(summary.outcome, SessionOutcome::Cancelled);
	assert_eq!(finished(&events), vec![summary]);
	assert!(!events.iter().any(|event| matches!(
		event,
		SearchEvent::Progress(text) if text.starts_with("Searching ") && text.contains(&second_root.display().to_string())
	)));
	assert!(!events.iter().any(|event| matches!(
		event,
		SearchEvent::ProgressDetail { current_root: Some(root), .. } if *root == second_root
	)));
	assert!(matches(&events).iter().all(|path| path.starts_with(first.path())));
}
