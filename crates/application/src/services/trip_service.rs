//! Trip service - Generates a structured itinerary from a travel question

use std::{fmt, sync::Arc};

use domain::{DomainError, Itinerary};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    normalization::{parse_itinerary, sanitize_model_output},
    ports::InferencePort,
};

/// System prompt asking the model for a strict itinerary JSON document
pub const DEFAULT_SYSTEM_PROMPT: &str = "你是严格的JSON生成器，只输出一个JSON对象，不输出任何其他内容。\
要求：1. 必须包含字段：tripName（字符串）、days（整数）、\
schedule（数组，元素含day（整数）、items（数组，元素含timeSlot、scenicName、scenicAddress、description、tips，均为字符串））、\
routeList（数组，元素含day（整数）、name、address、startTime、endTime、description（均为字符串）、longitude、latitude（均为数字））；\
2. 衢州景点经纬度必须准确（如江郎山：longitude=118.6798，latitude=28.5964）；\
3. 字段名大小写严格一致；\
4. 直接返回JSON，不要任何前缀、后缀或注释；\
5. 不要使用代码块包裹。";

/// Service for generating itineraries with a language model
pub struct TripService {
    inference: Arc<dyn InferencePort>,
    system_prompt: String,
}

impl fmt::Debug for TripService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripService")
            .field("system_prompt_len", &self.system_prompt.len())
            .finish_non_exhaustive()
    }
}

impl TripService {
    /// Create a trip service using [`DEFAULT_SYSTEM_PROMPT`]
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self::with_system_prompt(inference, DEFAULT_SYSTEM_PROMPT)
    }

    /// Create a trip service with a custom system prompt
    pub fn with_system_prompt(
        inference: Arc<dyn InferencePort>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            inference,
            system_prompt: prompt.into(),
        }
    }

    /// Generate an itinerary for a free-text travel question
    ///
    /// The model output is sanitized and parsed; no partial itinerary is
    /// ever returned.
    #[instrument(skip(self, user_question), fields(question_len = user_question.len()))]
    pub async fn generate_trip(&self, user_question: &str) -> Result<Itinerary, ApplicationError> {
        let question = user_question.trim();
        if question.is_empty() {
            return Err(DomainError::EmptyQuestion.into());
        }

        let result = self
            .inference
            .generate_with_system(&self.system_prompt, question)
            .await?;

        debug!(
            model = %result.model,
            tokens = ?result.tokens_used,
            latency_ms = result.latency_ms,
            "Itinerary text generated"
        );

        debug!(raw_output = %result.content, "Model output");

        let sanitized = sanitize_model_output(&result.content);
        let itinerary = parse_itinerary(&sanitized).inspect_err(|e| {
            warn!(error = %e, output_len = result.content.len(), "Model output rejected");
        })?;

        info!(
            trip_name = %itinerary.trip_name,
            days = itinerary.days,
            stops = itinerary.route_stops.len(),
            "Itinerary generated"
        );

        Ok(itinerary)
    }

    /// Check if the underlying inference is healthy
    pub async fn is_healthy(&self) -> bool {
        self.inference.is_healthy().await
    }

    /// Get the current model name
    pub fn current_model(&self) -> String {
        self.inference.current_model()
    }
}

#[cfg(test)]
mod tests {
    use std::{io, sync::Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::ports::{InferenceResult, MockInferencePort};

    const MODEL_OUTPUT: &str = r#"好的，以下是行程：
```json
{
  "tripName": "衢州一日游",
  "days": 1,
  "schedule": [
    {"day": 1, "items": [{"timeSlot": "09:00-12:00", "scenicName": "江郎山", "scenicAddress": "江山市", "description": "登山", "tips": "带水"}]}
  ],
  "routeList": [
    {"day": 1, "name": "江郎山", "address": "江山市", "startTime": "09:00", "endTime": "12:00", "description": "登山", "longitude": 118.6798, "latitude": 28.5964}
  ]
}
```"#;

    fn inference_result(content: &str) -> InferenceResult {
        InferenceResult {
            content: content.to_string(),
            model: "deepseek-chat".to_string(),
            tokens_used: Some(321),
            latency_ms: 1200,
        }
    }

    #[tokio::test]
    async fn generates_itinerary_from_fenced_output() {
        let mut mock = MockInferencePort::new();
        mock.expect_generate_with_system()
            .returning(|_, _| Ok(inference_result(MODEL_OUTPUT)));

        let service = TripService::new(Arc::new(mock));
        let itinerary = service.generate_trip("衢州一日游怎么安排？").await.unwrap();

        assert_eq!(itinerary.trip_name, "衢州一日游");
        assert_eq!(itinerary.days, 1);
        assert_eq!(itinerary.daily_schedules[0].label(), "第1天");
        assert_eq!(itinerary.route_stops[0].place_name, "江郎山");
        assert!(itinerary.raw_source.starts_with('{'));
    }

    #[tokio::test]
    async fn sends_system_prompt_and_trimmed_question() {
        let mut mock = MockInferencePort::new();
        mock.expect_generate_with_system()
            .withf(|system, message| system == DEFAULT_SYSTEM_PROMPT && message == "两天行程")
            .times(1)
            .returning(|_, _| Ok(inference_result(MODEL_OUTPUT)));

        let service = TripService::new(Arc::new(mock));
        assert!(service.generate_trip("  两天行程\n").await.is_ok());
    }

    #[tokio::test]
    async fn custom_system_prompt_is_used() {
        let mut mock = MockInferencePort::new();
        mock.expect_generate_with_system()
            .withf(|system, _| system == "只输出JSON")
            .returning(|_, _| Ok(inference_result(MODEL_OUTPUT)));

        let service = TripService::with_system_prompt(Arc::new(mock), "只输出JSON");
        assert!(service.generate_trip("行程").await.is_ok());
    }

    #[tokio::test]
    async fn blank_question_is_rejected_without_calling_the_model() {
        let mut mock = MockInferencePort::new();
        mock.expect_generate_with_system().never();

        let service = TripService::new(Arc::new(mock));
        let err = service.generate_trip("   ").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(DomainError::EmptyQuestion)));
    }

    #[tokio::test]
    async fn prose_only_output_is_unsanitizable() {
        let mut mock = MockInferencePort::new();
        mock.expect_generate_with_system()
            .returning(|_, _| Ok(inference_result("抱歉，我无法回答这个问题。")));

        let service = TripService::new(Arc::new(mock));
        let err = service.generate_trip("行程").await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::UnsanitizableModelOutput(_))
        ));
    }

    /// Collects formatted log lines for assertions
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn rejected_output_is_logged_verbatim_at_debug() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut mock = MockInferencePort::new();
        mock.expect_generate_with_system()
            .returning(|_, _| Ok(inference_result("抱歉，行程暂时无法生成 {\"tripName\": ")));

        let service = TripService::new(Arc::new(mock));
        assert!(service.generate_trip("行程").await.is_err());

        let output = logs.contents();
        assert!(output.contains("Model output"));
        assert!(output.contains("抱歉，行程暂时无法生成 {\"tripName\": "));
        assert!(output.contains("Model output rejected"));
    }

    #[tokio::test]
    async fn invalid_coordinates_abort_generation() {
        let output = MODEL_OUTPUT.replace("118.6798", "\"oops\"");
        let mut mock = MockInferencePort::new();
        mock.expect_generate_with_system()
            .returning(move |_, _| Ok(inference_result(&output)));

        let service = TripService::new(Arc::new(mock));
        let err = service.generate_trip("行程").await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::InvalidCoordinateValue { .. })
        ));
    }

    #[tokio::test]
    async fn inference_errors_propagate() {
        let mut mock = MockInferencePort::new();
        mock.expect_generate_with_system()
            .returning(|_, _| Err(ApplicationError::Inference("timeout".to_string())));

        let service = TripService::new(Arc::new(mock));
        let err = service.generate_trip("行程").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Inference(_)));
    }

    #[tokio::test]
    async fn health_and_model_are_delegated() {
        let mut mock = MockInferencePort::new();
        mock.expect_is_healthy().returning(|| true);
        mock.expect_current_model()
            .returning(|| "deepseek-chat".to_string());

        let service = TripService::new(Arc::new(mock));
        assert!(service.is_healthy().await);
        assert_eq!(service.current_model(), "deepseek-chat");
    }

    #[test]
    fn debug_hides_prompt_text() {
        let service = TripService::new(Arc::new(MockInferencePort::new()));
        let debug = format!("{service:?}");
        assert!(debug.contains("TripService"));
        assert!(!debug.contains("JSON生成器"));
    }
}
