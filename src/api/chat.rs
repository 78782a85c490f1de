use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::post,
    Router,
};

use super::routes::AppState;
use super::ApiError;
use crate::auth::jwt_auth_middleware;
use crate::models::{ChatMessage, ChatReply, ChatRequest};
use crate::services::ChatParams;

/// System message for the authenticated wellness coach
const COACH_SYSTEM_MESSAGE: &str = r#"You are Vitraya Health Coach, an AI wellness assistant designed to provide personalized healthcare guidance.

YOUR CAPABILITIES:
- Offer evidence-based health recommendations across nutrition, fitness, sleep hygiene, and stress management
- Explain complex health concepts in simple, friendly language
- Personalize advice based on user's specific health conditions, goals, and preferences
- Maintain a positive, supportive tone that encourages sustainable lifestyle changes
- Use appropriate emojis to make interactions friendly and engaging

YOUR LIMITATIONS:
- You are not a replacement for professional medical care or diagnosis
- You cannot prescribe medication or replace a doctor's advice
- You should recommend consulting healthcare professionals for serious health concerns
- You should not make definitive claims about treatment outcomes

RESPONSE GUIDELINES:
- Keep responses concise but informative (2-4 paragraphs maximum)
- Use a friendly, conversational tone with appropriate emojis (🍎, 🏃‍♂️, 😴, 🧘, etc.)
- Structure responses with clear, readable formatting using numbers for lists
- Do NOT use asterisks (**) or markdown formatting for emphasis
- For emphasis, use emojis or simply capitalize important words
- Include practical, actionable advice users can implement immediately
- When appropriate, reference that the advice comes from Vitraya's health philosophy

Remember that your purpose is to support users on their health journey as part of the Vitraya wellness ecosystem. Always encourage positive health behaviors in an empathetic, non-judgmental way."#;

/// Shorter system message for the unauthenticated trial endpoint
const TRIAL_SYSTEM_MESSAGE: &str = "You are Vitraya Coach 🤖. Give friendly, simple tips on preventive health: healthy food 🍎, moving your body 🏃‍♂️, good sleep 😴, and less stress 🧘. Use helpful emojis. without any bold character";

const EMPTY_REPLY: &str = "I'm sorry, I couldn't generate a response.";

pub fn chat_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/chat",
            post(chat).route_layer(middleware::from_fn_with_state(
                state.auth_service.clone(),
                jwt_auth_middleware,
            )),
        )
        .route("/chat-test", post(chat_test))
        .with_state(state)
}

/// Authenticated coach conversation
#[tracing::instrument(skip(state, request))]
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    run_conversation(&state, COACH_SYSTEM_MESSAGE, request).await
}

/// Unauthenticated trial conversation
#[tracing::instrument(skip(state, request))]
async fn chat_test(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    run_conversation(&state, TRIAL_SYSTEM_MESSAGE, request).await
}

async fn run_conversation(
    state: &AppState,
    system_message: &str,
    request: ChatRequest,
) -> Result<Json<ChatReply>, ApiError> {
    if request.messages.is_empty() {
        return Err(ApiError::bad_request(
            "Messages are required and must be a non-empty array",
        ));
    }

    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    messages.push(ChatMessage::system(system_message));
    messages.extend(request.messages);

    let content = state
        .chat_client
        .complete(&messages, ChatParams::coach())
        .await?;

    Ok(Json(ChatReply {
        message: content.unwrap_or_else(|| EMPTY_REPLY.to_string()),
    }))
}
