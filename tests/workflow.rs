//! Workflow orchestration tests
//!
//! Exercises the two-stage workflow against a scripted stub runner, so the
//! orchestration layer is tested independently of the hosted execution
//! service.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use apiscout::agent::{api_master, consumer, AgentDefinition, ConversationLog, RunContext, Workflow};
use apiscout::core::{Config, MessageItem, Result, Role, RunResult, ScoutError, Stage};
use apiscout::runner::Runner;

/// One scripted runner response
enum Step {
    Produce(RunResult),
    Fail(String),
}

/// What the workflow passed into one runner invocation
#[derive(Debug, Clone)]
struct RecordedCall {
    agent_name: String,
    items: Vec<MessageItem>,
    api_docs: Option<String>,
    rendered_instructions: String,
}

/// Runner double that returns scripted results and records its inputs
struct StubRunner {
    script: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubRunner {
    fn new(steps: Vec<Step>) -> Self {
        Self {
            script: Mutex::new(steps.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn call(&self, index: usize) -> RecordedCall {
        self.calls.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl Runner for StubRunner {
    async fn run(
        &self,
        definition: &AgentDefinition,
        log: &ConversationLog,
        ctx: &RunContext,
    ) -> Result<RunResult> {
        self.calls.lock().unwrap().push(RecordedCall {
            agent_name: definition.name().to_string(),
            items: log.items().to_vec(),
            api_docs: ctx.api_docs.clone(),
            rendered_instructions: definition.instructions().render(ctx),
        });

        match self.script.lock().unwrap().pop_front() {
            Some(Step::Produce(result)) => Ok(result),
            Some(Step::Fail(message)) => Err(ScoutError::gateway(message)),
            None => panic!("stub runner called more times than scripted"),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Build a workflow over the real agent definitions and a scripted runner
fn scripted_workflow(steps: Vec<Step>) -> (Arc<StubRunner>, Workflow) {
    std::env::set_var("APISCOUT_REMOTE_CREDENTIAL", "test-credential");
    let config = Config::default();

    let runner = Arc::new(StubRunner::new(steps));
    let workflow = Workflow::new(
        runner.clone(),
        api_master(&config),
        consumer(&config).expect("consumer definition"),
    );

    (runner, workflow)
}

fn discovery_step() -> Step {
    Step::Produce(RunResult {
        new_items: vec![MessageItem::assistant("found an API")],
        final_output: Some("Use api.weather.example/v1?city=Paris".to_string()),
    })
}

fn consumption_step() -> Step {
    Step::Produce(RunResult {
        new_items: vec![MessageItem::assistant("It is 18°C in Paris.")],
        final_output: Some("It is 18°C in Paris.".to_string()),
    })
}

#[tokio::test]
async fn log_into_stage_two_is_seed_plus_discovery_items() {
    let (runner, workflow) = scripted_workflow(vec![discovery_step(), consumption_step()]);

    workflow.run("What's the weather in Paris?").await.unwrap();

    let first = runner.call(0);
    assert_eq!(first.agent_name, "API MASTER");
    assert_eq!(first.items.len(), 1);
    assert_eq!(first.items[0].role, Role::User);
    assert_eq!(first.items[0].text(), "What's the weather in Paris?");

    let second = runner.call(1);
    assert_eq!(second.agent_name, "Agent");
    assert_eq!(second.items.len(), 2);
    assert_eq!(second.items[0].text(), "What's the weather in Paris?");
    assert_eq!(second.items[1].text(), "found an API");
}

#[tokio::test]
async fn side_channel_equals_discovery_output_exactly() {
    let (runner, workflow) = scripted_workflow(vec![discovery_step(), consumption_step()]);

    workflow.run("What's the weather in Paris?").await.unwrap();

    let second = runner.call(1);
    assert_eq!(
        second.api_docs.as_deref(),
        Some("Use api.weather.example/v1?city=Paris")
    );
    // The instruction template adds only its documented prefix
    assert_eq!(
        second.rendered_instructions,
        "Your job is to use the below documented API to return an answer to the \
         user's question. Use api.weather.example/v1?city=Paris"
    );

    // Stage one sees no side-channel context
    assert!(runner.call(0).api_docs.is_none());
}

#[tokio::test]
async fn discovery_without_output_fails_naming_the_stage() {
    let (runner, workflow) = scripted_workflow(vec![Step::Produce(RunResult {
        new_items: vec![MessageItem::assistant("partial work")],
        final_output: None,
    })]);

    let err = workflow.run("question").await.unwrap_err();
    assert!(matches!(
        err,
        ScoutError::MissingOutput(Stage::Discovery)
    ));
    assert_eq!(runner.call_count(), 1);
}

#[tokio::test]
async fn consumption_without_output_fails_naming_the_stage() {
    let (runner, workflow) = scripted_workflow(vec![
        discovery_step(),
        Step::Produce(RunResult {
            new_items: Vec::new(),
            final_output: None,
        }),
    ]);

    let err = workflow.run("question").await.unwrap_err();
    assert!(matches!(
        err,
        ScoutError::MissingOutput(Stage::Consumption)
    ));
    assert_eq!(runner.call_count(), 2);
}

#[tokio::test]
async fn empty_input_is_rejected_before_any_run() {
    let (runner, workflow) = scripted_workflow(Vec::new());

    for input in ["", "   ", "\t\n"] {
        let err = workflow.run(input).await.unwrap_err();
        assert!(matches!(err, ScoutError::InvalidInput(_)));
    }

    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn runner_failure_propagates_unchanged() {
    let (runner, workflow) =
        scripted_workflow(vec![Step::Fail("quota exhausted".to_string())]);

    let err = workflow.run("question").await.unwrap_err();
    match err {
        ScoutError::Gateway(message) => assert_eq!(message, "quota exhausted"),
        other => panic!("expected gateway error, got {:?}", other),
    }
    assert_eq!(runner.call_count(), 1);
}

#[tokio::test]
async fn identical_inputs_produce_identical_orchestration() {
    let (_, first) = scripted_workflow(vec![discovery_step(), consumption_step()]);
    let (_, second) = scripted_workflow(vec![discovery_step(), consumption_step()]);

    let a = first.run_detailed("What's the weather in Paris?").await.unwrap();
    let b = second.run_detailed("What's the weather in Paris?").await.unwrap();

    assert_eq!(a.log.len(), b.log.len());
    assert_eq!(a.api_docs, b.api_docs);
    assert_eq!(a.output, b.output);
}

#[tokio::test]
async fn paris_end_to_end() {
    let (runner, workflow) = scripted_workflow(vec![discovery_step(), consumption_step()]);

    let report = workflow
        .run_detailed("What's the weather in Paris?")
        .await
        .unwrap();

    assert_eq!(report.output.output_text, "It is 18°C in Paris.");
    assert_eq!(report.api_docs, "Use api.weather.example/v1?city=Paris");

    // Final log: seed, discovery item, consumption item, in order
    let texts: Vec<String> = report.log.items().iter().map(|i| i.text()).collect();
    assert_eq!(
        texts,
        vec![
            "What's the weather in Paris?",
            "found an API",
            "It is 18°C in Paris.",
        ]
    );
    assert_eq!(report.log.items()[0].role, Role::User);
    assert_eq!(report.log.items()[1].role, Role::Assistant);
    assert_eq!(report.log.items()[2].role, Role::Assistant);

    // The stub saw the discovered documentation in stage two's instructions
    assert!(runner
        .call(1)
        .rendered_instructions
        .contains("api.weather.example"));
}
