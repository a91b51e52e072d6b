//! HTTP handlers for this service.

use axum::extract::{DefaultBodyLimit, State};
use axum::{routing, Router};
use cpe::{CourseFormat, CreditType};

use super::{
	Course,
	CourseDraft,
	CourseFiles,
	CourseFileKind,
	CourseID,
	CourseService,
	CourseUpdate,
	CreateCourseRequest,
	CreateCourseResponse,
	CreditEntry,
	Error,
	FetchCoursesRequest,
	FetchCoursesResponse,
	FormatEntry,
	NewCourse,
	Result,
	UpdateCourseRequest,
	UpdateCourseResponse,
	DEFAULT_ONLINE_PRICE,
};
use crate::http::extract::{MultipartForm, Path, Query};
use crate::http::ProblemDetails;
use crate::middleware;
use crate::services::auth::AdminSession;
use crate::services::import::states::extract_states;

/// Maximum size of a course form, including both PDFs.
pub(crate) const MAX_FORM_SIZE: usize = 64 * 1024 * 1024;

/// Form fields holding the price of each format.
const PRICE_FIELDS: [(CourseFormat, &str); 3] = [
	(CourseFormat::Online, "online_price"),
	(CourseFormat::Hardcopy, "hardcopy_price"),
	(CourseFormat::Video, "video_price"),
];

/// Form fields holding the amount and course number of each credit type.
const CREDIT_FIELDS: [(CreditType, &str, &str); 5] = [
	(CreditType::Cpa, "cpa_credits", "cpa_course_number"),
	(CreditType::Cfp, "cfp_credits", "cfp_course_number"),
	(CreditType::EaOtrp, "ea_otrp_credits", "ea_otrp_course_number"),
	(CreditType::Erpa, "erpa_credits", "erpa_course_number"),
	(CreditType::Cdfa, "cdfa_credits", "cdfa_course_number"),
];

impl From<CourseService> for Router
{
	fn from(svc: CourseService) -> Self
	{
		let public = Router::new()
			.route("/courses", routing::get(get_many))
			.route("/courses/:course", routing::get(get_single))
			.route_layer(middleware::cors::permissive())
			.with_state(svc.clone());

		let protected = Router::new()
			.route("/admin/courses", routing::post(create_course))
			.route("/admin/courses/:course", routing::patch(update_course))
			.route_layer(DefaultBodyLimit::max(MAX_FORM_SIZE))
			.route_layer(middleware::cors::dashboard(svc.auth_svc.dashboard_origin(), [
				http::Method::OPTIONS,
				http::Method::POST,
				http::Method::PATCH,
			]))
			.with_state(svc.clone());

		public.merge(protected)
	}
}

#[tracing::instrument(err(Debug, level = "debug"))]
#[utoipa::path(
	get,
	path = "/api/courses",
	tag = "Courses",
	operation_id = "get_courses",
	params(FetchCoursesRequest),
	responses(FetchCoursesResponse, ProblemDetails)
)]
pub(crate) async fn get_many(
	State(svc): State<CourseService>,
	Query(req): Query<FetchCoursesRequest>,
) -> Result<FetchCoursesResponse, ProblemDetails>
{
	let res = svc.fetch_courses(req).await?;

	if res.courses.is_empty() {
		Err(Error::NoData)?;
	}

	Ok(res)
}

#[tracing::instrument(err(Debug, level = "debug"))]
#[utoipa::path(
	get,
	path = "/api/courses/{course}",
	tag = "Courses",
	operation_id = "get_course",
	params(("course" = CourseID, Path, description = "a course's ID")),
	responses(Course, ProblemDetails)
)]
pub(crate) async fn get_single(
	State(svc): State<CourseService>,
	Path(course_id): Path<CourseID>,
) -> Result<Course, ProblemDetails>
{
	let course = svc
		.fetch_course(course_id)
		.await?
		.ok_or(Error::CourseDoesNotExist)?;

	Ok(course)
}

#[tracing::instrument(skip(form), err(Debug, level = "debug"))]
#[utoipa::path(
	post,
	path = "/api/admin/courses",
	tag = "Courses",
	request_body(content = CourseForm, content_type = "multipart/form-data"),
	responses(CreateCourseResponse, ProblemDetails),
	security(("Admin Cookie" = []))
)]
pub(crate) async fn create_course(
	_session: AdminSession,
	State(svc): State<CourseService>,
	mut form: MultipartForm,
) -> Result<CreateCourseResponse, ProblemDetails>
{
	let course = new_course_from_form(&form, &svc)?;
	let files = take_files(&mut form);
	let res = svc.create_course(CreateCourseRequest { course, files }).await?;

	Ok(res)
}

#[tracing::instrument(skip(form), err(Debug, level = "debug"))]
#[utoipa::path(
	patch,
	path = "/api/admin/courses/{course}",
	tag = "Courses",
	params(("course" = CourseID, Path, description = "a course's ID")),
	request_body(content = CourseForm, content_type = "multipart/form-data"),
	responses(UpdateCourseResponse, ProblemDetails),
	security(("Admin Cookie" = []))
)]
pub(crate) async fn update_course(
	_session: AdminSession,
	State(svc): State<CourseService>,
	Path(course_id): Path<CourseID>,
	mut form: MultipartForm,
) -> Result<UpdateCourseResponse, ProblemDetails>
{
	let update = update_from_form(&form);
	let files = take_files(&mut form);
	let res = svc
		.update_course(UpdateCourseRequest { course_id, update, files })
		.await?;

	Ok(res)
}

/// The multipart form accepted by the admin course endpoints.
///
/// When updating, every field is optional and blank fields are ignored.
#[derive(utoipa::ToSchema)]
#[doc(hidden)]
#[allow(dead_code, clippy::missing_docs_in_private_items)]
pub(crate) struct CourseForm
{
	sku: String,
	title: String,
	description: Option<String>,
	author: Option<String>,
	main_subject: Option<String>,

	/// `|` or `,` separated state names or postal codes.
	states: Option<String>,

	/// Defaults to 15.
	online_price: Option<f64>,
	hardcopy_price: Option<f64>,
	video_price: Option<f64>,
	cpa_credits: Option<f64>,
	cpa_course_number: Option<String>,
	cfp_credits: Option<f64>,
	cfp_course_number: Option<String>,
	ea_otrp_credits: Option<f64>,
	ea_otrp_course_number: Option<String>,
	erpa_credits: Option<f64>,
	erpa_course_number: Option<String>,
	cdfa_credits: Option<f64>,
	cdfa_course_number: Option<String>,

	#[schema(value_type = Option<String>, format = Binary)]
	table_of_contents: Option<Vec<u8>>,

	#[schema(value_type = Option<String>, format = Binary)]
	course_content: Option<Vec<u8>>,
}

/// Builds the course to create out of a submitted form.
fn new_course_from_form(form: &MultipartForm, svc: &CourseService) -> Result<NewCourse>
{
	let text = |name: &str| form.text(name).unwrap_or_default().to_owned();

	let draft = CourseDraft {
		sku: text("sku"),
		title: text("title"),
		description: text("description"),
		author: text("author"),
		main_subject: text("main_subject"),
		table_of_contents_url: String::new(),
		course_content_url: String::new(),
	};

	let mut formats = Vec::new();

	for (format, field) in PRICE_FIELDS {
		let price = match parse_amount(form, field)? {
			None if format == CourseFormat::Online => DEFAULT_ONLINE_PRICE,
			None => continue,
			Some(price) => price,
		};

		formats.push(FormatEntry { format, price });
	}

	let mut credits = Vec::new();

	for (credit_type, amount_field, number_field) in CREDIT_FIELDS {
		let Some(amount) = parse_amount(form, amount_field)? else {
			continue;
		};

		let course_number = form.text(number_field).unwrap_or_default().to_owned();

		credits.push(CreditEntry { credit_type, amount, course_number });
	}

	let states = form
		.text("states")
		.map(|raw| extract_states(raw, &svc.states))
		.unwrap_or_default();

	Ok(NewCourse { draft, formats, credits, states })
}

/// Parses a numeric form field.
///
/// Missing fields and zero yield `None`; negative or non-numeric values are
/// rejected.
fn parse_amount(form: &MultipartForm, field: &'static str) -> Result<Option<f64>>
{
	let Some(raw) = form.text(field) else {
		return Ok(None);
	};

	let value = raw
		.parse::<f64>()
		.ok()
		.filter(|value| value.is_finite() && *value >= 0.0)
		.ok_or_else(|| Error::InvalidField {
			field,
			reason: format!("`{raw}` is not a non-negative number"),
		})?;

	Ok((value > 0.0).then_some(value))
}

/// Collects the fields of a course update out of a submitted form.
fn update_from_form(form: &MultipartForm) -> CourseUpdate
{
	let text = |name: &str| form.text(name).map(ToOwned::to_owned);

	CourseUpdate {
		sku: text("sku"),
		title: text("title"),
		description: text("description"),
		author: text("author"),
		main_subject: text("main_subject"),
		table_of_contents_url: None,
		course_content_url: None,
	}
}

/// Takes the course PDFs out of a submitted form.
fn take_files(form: &mut MultipartForm) -> CourseFiles
{
	CourseFiles {
		table_of_contents: form.take_file(CourseFileKind::TableOfContents.form_field()),
		course_content: form.take_file(CourseFileKind::CourseContent.form_field()),
	}
}
