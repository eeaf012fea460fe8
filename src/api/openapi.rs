//! OpenAPI document for every REST endpoint.

use utoipa::OpenApi;

use super::dto::{
    BookTicketRequest, BookTicketResponse, CreateEventRequest, CreateEventResponse,
    CreatePollRequest, EngagementResponse, EventListResponse, EventStatusResponse,
    ExportLinkResponse, LoginRequest, LoginResponse, MessageResponse, PollListResponse,
    PollResponse, PollVoteRequest, QuestionListResponse, QuestionResponse,
    SamplePollListResponse, SamplePollRequest, SamplePollResponse, SubmitQuestionRequest,
};
use super::handlers::{auth, bookings, dashboard, engagement, events, system};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI description of the gateway.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "eventpro-gateway",
        description = "Event management, ticketing, live engagement and post-event analytics."
    ),
    paths(
        system::health_handler,
        auth::login,
        auth::logout,
        events::list_events,
        events::create_event,
        events::create_event_form,
        events::event_status,
        events::go_live,
        events::end_event,
        events::post_analytics,
        bookings::book_ticket,
        bookings::live_sales,
        bookings::export_bookings,
        engagement::get_engagement,
        engagement::list_polls,
        engagement::create_poll,
        engagement::vote_poll,
        engagement::delete_poll,
        engagement::list_questions,
        engagement::submit_question,
        engagement::vote_question,
        engagement::delete_question,
        dashboard::overview,
        dashboard::revenue,
        dashboard::engagement,
        dashboard::feedback,
        dashboard::sample_polls,
        dashboard::echo_poll,
        dashboard::live_updates,
        dashboard::export_data,
        dashboard::event_analytics,
    ),
    components(schemas(
        ErrorResponse,
        ErrorBody,
        MessageResponse,
        LoginRequest,
        LoginResponse,
        CreateEventRequest,
        CreateEventResponse,
        EventListResponse,
        EventStatusResponse,
        BookTicketRequest,
        BookTicketResponse,
        EngagementResponse,
        PollListResponse,
        CreatePollRequest,
        PollVoteRequest,
        PollResponse,
        QuestionListResponse,
        SubmitQuestionRequest,
        QuestionResponse,
        SamplePollListResponse,
        SamplePollRequest,
        SamplePollResponse,
        ExportLinkResponse,
    )),
    tags(
        (name = "System", description = "Health"),
        (name = "Auth", description = "Demo account sessions"),
        (name = "Events", description = "Event lifecycle"),
        (name = "Tickets", description = "Bookings and live sales"),
        (name = "Engagement", description = "Live polls and Q&A"),
        (name = "Analytics", description = "Post-event report"),
        (name = "Dashboard", description = "Dashboard figures"),
    )
)]
pub struct ApiDoc;
