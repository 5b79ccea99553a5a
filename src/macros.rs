/// Implements [`IntoResponse`] for an error type that implements [`AsProblemDetails`].
///
/// [`IntoResponse`]: axum::response::IntoResponse
/// [`AsProblemDetails`]: problem_details::AsProblemDetails
macro_rules! impl_into_response {
	($ty:ty) => {
		impl ::axum::response::IntoResponse for $ty
		{
			fn into_response(self) -> ::axum::response::Response
			{
				::axum::response::IntoResponse::into_response(
					::problem_details::AsProblemDetails::as_problem_details(&self),
				)
			}
		}
	};
}

/// Defines an enum of problem types and implements [`problem_details::ProblemType`] for it.
///
/// Every variant is annotated with the `title` and `status` it should produce, and is assigned
/// the slug that will be appended to the base URI (see [`crate::http::problem::set_base_uri()`]).
macro_rules! problem_type {
	(
		$(#[$meta:meta])*
		$vis:vis enum $name:ident
		{
			$(
				$(#[cfg($cfg:meta)])?
				#[title = $title:literal]
				#[status = $status:ident]
				$variant:ident = $slug:literal,
			)*
		}
	) => {
		$(#[$meta])*
		$vis enum $name
		{
			$(
				$(#[cfg($cfg)])?
				#[error($title)]
				$variant,
			)*
		}

		impl $name
		{
			/// Every problem type this API may respond with.
			#[allow(dead_code)]
			pub const ALL: &[Self] = &[$($(#[cfg($cfg)])? Self::$variant,)*];

			/// The slug identifying this problem type.
			pub fn slug(&self) -> &'static str
			{
				match *self {
					$($(#[cfg($cfg)])? Self::$variant => $slug,)*
				}
			}
		}

		impl ::problem_details::ProblemType for $name
		{
			fn uri(&self) -> ::http::Uri
			{
				$crate::http::problem::make_uri(self.slug())
			}

			fn status(&self) -> ::http::StatusCode
			{
				match *self {
					$($(#[cfg($cfg)])? Self::$variant => ::http::StatusCode::$status,)*
				}
			}

			fn title(&self) -> &'static str
			{
				match *self {
					$($(#[cfg($cfg)])? Self::$variant => $title,)*
				}
			}
		}
	};
}
