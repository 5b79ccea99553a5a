/// The kind of problem a response describes.
///
/// Every [`ProblemDetails`] carries one of these. It decides the response's status code and the
/// fixed members of the body; the per-occurrence `detail` lives on [`ProblemDetails`] itself.
///
/// [`ProblemDetails`]: crate::ProblemDetails
#[diagnostic::on_unimplemented(
	message = "`{Self}` cannot describe an HTTP problem",
	note = "implement `ProblemType` for `{Self}` to use it with `ProblemDetails`"
)]
pub trait ProblemType
{
	/// Reference identifying the problem type (RFC 9457, section 3.1.1).
	///
	/// Serialized as the `type` member.
	fn uri(&self) -> http::Uri;

	/// HTTP status code for responses carrying this problem type.
	///
	/// Used both as the response status and as the `status` member.
	fn status(&self) -> http::StatusCode;

	/// Short summary that does not change between occurrences.
	fn title(&self) -> &'static str;
}
