// self
use smartnsf_auth::{
	_preludet::*,
	auth::SessionCookie,
	error::TransportError,
	http::{DelegatedRequest, DelegatedResponse, DelegationHttpClient, HttpFuture},
	outcome::{Outcome, OutcomeSlot},
	strategy::{SmartNsfStrategy, SmartNsfStrategyBuilder, Strategy},
};

#[derive(Debug)]
struct FakeTransportError;
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Connection reset by fake peer.")
	}
}
impl StdError for FakeTransportError {}

#[derive(Clone, Debug, PartialEq, Eq)]
struct RecordedExchange {
	url: String,
	username: String,
	redirect_to: String,
	cookie_scope: String,
}

/// Scripted transport that answers every exchange from the submitted username.
#[derive(Default)]
struct FakeHttpClient {
	status: Option<u16>,
	broken: bool,
	exchanges: Mutex<Vec<RecordedExchange>>,
}
impl FakeHttpClient {
	fn with_status(status: u16) -> Self {
		Self { status: Some(status), ..Default::default() }
	}

	fn broken() -> Self {
		Self { broken: true, ..Default::default() }
	}

	fn exchanges(&self) -> Vec<RecordedExchange> {
		self.exchanges.lock().clone()
	}
}
impl DelegationHttpClient for FakeHttpClient {
	fn post_form<'a>(&'a self, request: DelegatedRequest<'a>) -> HttpFuture<'a, DelegatedResponse> {
		Box::pin(async move {
			self.exchanges.lock().push(RecordedExchange {
				url: request.url.to_string(),
				username: request.form.username().to_owned(),
				redirect_to: request.form.redirect_to().to_owned(),
				cookie_scope: request.cookie_scope.to_string(),
			});

			if self.broken {
				return Err(TransportError::network(FakeTransportError).into());
			}

			let username = request.form.username();

			// Yield so concurrent attempts interleave.
			tokio::task::yield_now().await;

			Ok(DelegatedResponse {
				status: self.status.unwrap_or(200),
				body: format!("{{\"username\":\"{username}/ACME\"}}"),
				cookies: vec![SessionCookie::new("DomAuthSessId", format!("{username}-session"))],
			})
		})
	}
}

fn build_fake_strategy(
	http_client: Arc<FakeHttpClient>,
	verifier: RecordingVerifier,
) -> SmartNsfStrategy<TestExtractor, RecordingVerifier, FakeHttpClient> {
	SmartNsfStrategyBuilder::with_http_client(http_client)
		.login_path_root(TEST_LOGIN_PATH)
		.remote_host("https://domino.acme.example/")
		.extractor(extract_test_credentials as TestExtractor)
		.verify(verifier)
		.build()
		.expect("Fake strategy should build from a valid configuration.")
}

#[tokio::test]
async fn custom_transport_receives_resolved_endpoints() {
	let http_client = Arc::new(FakeHttpClient::default());
	let strategy =
		build_fake_strategy(http_client.clone(), RecordingVerifier::new(VerifierBehavior::Resolve));
	let outcome = strategy.authenticate(&TestRequest::new("hans", "secret")).await;

	assert_eq!(outcome.user().map(|user| user.username.as_str()), Some("hans/ACME"));
	assert_eq!(
		http_client.exchanges(),
		vec![RecordedExchange {
			url: "https://domino.acme.example/names.nsf?login".into(),
			username: "hans".into(),
			redirect_to: "/apps/app.nsf/xsp/.xrest/?login".into(),
			cookie_scope: "https://domino.acme.example/".into(),
		}]
	);
}

#[tokio::test]
async fn transport_failures_surface_as_errors() {
	let http_client = Arc::new(FakeHttpClient::broken());
	let verifier = RecordingVerifier::new(VerifierBehavior::Resolve);
	let strategy = build_fake_strategy(http_client, verifier.clone());

	match strategy.authenticate(&TestRequest::new("hans", "secret")).await {
		Outcome::Error(err @ Error::Transport(_)) => {
			let source = err.source().map(ToString::to_string);

			assert_eq!(source.as_deref(), Some("Connection reset by fake peer."));
		},
		other => panic!("Unexpected outcome: {other:?}."),
	}

	assert_eq!(verifier.calls(), 0);
}

#[tokio::test]
async fn unfollowed_redirect_status_is_an_error() {
	let http_client = Arc::new(FakeHttpClient::with_status(302));
	let strategy =
		build_fake_strategy(http_client, RecordingVerifier::new(VerifierBehavior::Resolve));
	let outcome = strategy.authenticate(&TestRequest::new("hans", "secret")).await;

	assert!(matches!(outcome, Outcome::Error(Error::UnexpectedStatus { status: 302 })));
}

#[tokio::test]
async fn strategy_trait_object_reports_once_per_call() {
	let http_client = Arc::new(FakeHttpClient::default());
	let strategy: Arc<dyn Strategy<TestRequest, User = TestUser>> = Arc::new(build_fake_strategy(
		http_client.clone(),
		RecordingVerifier::new(VerifierBehavior::Resolve),
	));
	let success = OutcomeSlot::default();
	let error = OutcomeSlot::default();

	assert_eq!(strategy.name(), "smartnsf");

	strategy.authenticate(&TestRequest::new("hans", "secret")).await.report(success.clone());
	strategy.authenticate(&TestRequest::default()).await.report(error.clone());

	assert!(matches!(success.take(), Some(Outcome::Success(TestUser { id: 1, .. }))));
	assert!(success.take().is_none());
	assert!(matches!(error.take(), Some(Outcome::Error(Error::MissingCredentials { .. }))));
	assert_eq!(http_client.exchanges().len(), 1);
}

#[tokio::test]
async fn concurrent_attempts_never_share_credentials_or_cookies() {
	let http_client = Arc::new(FakeHttpClient::default());
	let verifier = RecordingVerifier::new(VerifierBehavior::Resolve);
	let strategy = Arc::new(build_fake_strategy(http_client.clone(), verifier.clone()));
	let handles = ["alice", "bob", "carol", "dave"].map(|name| {
		let strategy = Arc::clone(&strategy);

		tokio::spawn(async move {
			let request = TestRequest::new(name, &format!("{name}-secret"));

			(name, strategy.authenticate(&request).await)
		})
	});

	for handle in handles {
		let (name, outcome) = handle.await.expect("Authentication task should not panic.");

		assert_eq!(
			outcome.user().map(|user| user.username.clone()),
			Some(format!("{name}/ACME"))
		);
	}

	let seen = verifier.seen();

	assert_eq!(seen.len(), 4);

	for identity in seen {
		let name = identity.username.trim_end_matches("/ACME").to_owned();

		assert_eq!(
			identity.cookies,
			vec![SessionCookie::new("DomAuthSessId", format!("{name}-session"))]
		);
	}

	let mut usernames =
		http_client.exchanges().into_iter().map(|exchange| exchange.username).collect::<Vec<_>>();

	usernames.sort();

	assert_eq!(usernames, ["alice", "bob", "carol", "dave"]);
}
