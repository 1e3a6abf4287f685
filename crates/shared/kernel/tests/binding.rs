#![allow(deprecated)]

use databind_kernel::domain::config::UnknownParameters;
use databind_kernel::prelude::*;
use std::collections::BTreeMap;

#[data_model]
#[derive(Debug, Clone, PartialEq)]
struct GitScm {
    url: String,
    branch: Option<String>,
}

#[data_model]
#[derive(Debug, Clone, PartialEq)]
struct Shell {
    script: String,
    #[data(default)]
    return_status: bool,
}

#[data_model]
#[derive(Debug, Clone, PartialEq)]
struct Job {
    #[data(rename = "agent-label")]
    agent: String,
    scm: GitScm,
    steps: Vec<Shell>,
    #[data(default)]
    environment: BTreeMap<String, String>,
    #[data(default)]
    retries: u8,
    #[data(skip)]
    cache_key: String,
    #[deprecated]
    node: Option<String>,
}

#[data_model]
#[derive(Debug, Clone, PartialEq)]
struct Gauge {
    ratio: f32,
}

fn mapping(entries: Vec<(&str, TreeNode)>) -> TreeNode {
    TreeNode::Mapping(entries.into_iter().collect())
}

fn job_tree() -> TreeNode {
    mapping(vec![
        ("agent-label", "linux".into()),
        ("scm", mapping(vec![("url", "https://example.com/repo.git".into())])),
        ("steps", TreeNode::Sequence(vec!["make".into(), mapping(vec![("script", "make test".into())])])),
    ])
}

#[test]
fn nested_document_reads_with_shorthand() {
    let model = by_reflection::<Job>().unwrap();
    let job = model.read(&job_tree(), &mut DataContext::new()).unwrap();

    assert_eq!(job.agent, "linux");
    assert_eq!(job.scm, GitScm { url: "https://example.com/repo.git".to_owned(), branch: None });
    assert_eq!(
        job.steps,
        [
            Shell { script: "make".to_owned(), return_status: false },
            Shell { script: "make test".to_owned(), return_status: false },
        ]
    );
    assert_eq!(job.retries, 0);
    assert!(job.cache_key.is_empty());
}

#[test]
fn write_then_read_gives_the_same_value() {
    let model = by_reflection::<Job>().unwrap();
    let job = Job {
        agent: "windows".to_owned(),
        scm: GitScm { url: "git@host:repo".to_owned(), branch: Some("main".to_owned()) },
        steps: vec![Shell { script: "build.bat".to_owned(), return_status: true }],
        environment: BTreeMap::from([("CI".to_owned(), "1".to_owned())]),
        retries: 3,
        cache_key: String::new(),
        node: None,
    };

    let mut context = DataContext::new();
    let tree = model.write(&job, &mut context).unwrap();
    assert_eq!(model.read(&tree, &mut context).unwrap(), job);
    assert!(context.warnings().is_empty());
}

#[test]
fn defaults_are_omitted_on_write() {
    let model = by_reflection::<Shell>().unwrap();
    let tree = model
        .write(&Shell { script: "ls".to_owned(), return_status: false }, &mut DataContext::new())
        .unwrap();
    assert_eq!(tree, mapping(vec![("script", "ls".into())]));
}

#[test]
fn missing_mandatory_parameter_names_its_path() {
    let model = by_reflection::<Job>().unwrap();
    let tree = mapping(vec![
        ("agent-label", "linux".into()),
        ("scm", mapping(vec![("url", "u".into())])),
        ("steps", TreeNode::Sequence(vec![mapping(vec![("return_status", true.into())])])),
    ]);

    let err = model.read(&tree, &mut DataContext::new()).unwrap_err();
    assert!(err.is_io_class());
    assert!(err.to_string().contains("missing mandatory parameter 'steps[0].script'"), "{err}");
}

#[test]
fn type_mismatch_names_its_path() {
    let model = by_reflection::<Job>().unwrap();
    let mut tree = job_tree();
    if let TreeNode::Mapping(entries) = &mut tree {
        entries.insert("retries", 1000_i64);
    }
    let err = model.read(&tree, &mut DataContext::new()).unwrap_err();
    assert_eq!(err.to_string(), "Read failed: 1000 at 'retries' is out of range for u8");
}

#[test]
fn unknown_parameters_follow_the_policy() {
    let model = by_reflection::<GitScm>().unwrap();
    let tree = mapping(vec![("url", "u".into()), ("depth", 1_i64.into())]);

    let err = model.read(&tree, &mut DataContext::new()).unwrap_err();
    assert!(err.to_string().contains("unknown parameter(s) 'depth' for GitScm"), "{err}");

    let mut warn = DataContext::new().with_unknown_parameters(UnknownParameters::Warn);
    assert!(model.read(&tree, &mut warn).is_ok());
    assert_eq!(warn.warnings().len(), 1);

    let mut ignore = DataContext::new().with_unknown_parameters(UnknownParameters::Ignore);
    assert!(model.read(&tree, &mut ignore).is_ok());
    assert!(ignore.warnings().is_empty());
}

#[test]
fn deprecated_parameters_warn_when_present() {
    let model = by_reflection::<Job>().unwrap();
    let mut tree = job_tree();
    if let TreeNode::Mapping(entries) = &mut tree {
        entries.insert("node", "master");
    }
    let mut context = DataContext::new();
    let job = model.read(&tree, &mut context).unwrap();
    assert_eq!(job.node.as_deref(), Some("master"));
    assert_eq!(context.warnings(), ["parameter 'node' of Job is deprecated"]);
}

#[test]
fn scalar_for_multi_parameter_model_fails() {
    let model = by_reflection::<Job>().unwrap();
    let err = model.read(&TreeNode::from("linux"), &mut DataContext::new()).unwrap_err();
    assert_eq!(err.to_string(), "Read failed: expected a mapping for Job at the document root, found string");
}

#[test]
fn models_are_shareable_across_threads() {
    let model = by_reflection::<Shell>().unwrap();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let model = std::sync::Arc::clone(&model);
            std::thread::spawn(move || {
                let shell = Shell { script: format!("step {i}"), return_status: i % 2 == 0 };
                let mut context = DataContext::new();
                let tree = model.write(&shell, &mut context).unwrap();
                model.read(&tree, &mut context).unwrap() == shell
            })
        })
        .collect();
    assert!(handles.into_iter().all(|h| h.join().unwrap()));
}

#[test]
fn single_precision_overflow_fails_on_read() {
    let model = by_reflection::<Gauge>().unwrap();
    let err = model.read(&mapping(vec![("ratio", 1e300.into())]), &mut DataContext::new()).unwrap_err();
    assert_eq!(err.to_string(), "Read failed: 1e300 at 'ratio' is out of range for f32");

    let gauge = model.read(&mapping(vec![("ratio", 0.25.into())]), &mut DataContext::new()).unwrap();
    let tree = model.write(&gauge, &mut DataContext::new()).unwrap();
    assert_eq!(model.read(&tree, &mut DataContext::new()).unwrap(), gauge);
}
