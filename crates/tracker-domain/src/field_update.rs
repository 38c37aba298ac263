/// Represents a field update operation for partial updates
///
/// This type provides a clear, three-state pattern for updating fields that
/// may be blank:
/// - `NoChange`: Field keeps its existing value
/// - `Set(value)`: Field is updated to the provided value
/// - `Clear`: Field is reset to its empty value
///
/// # Example
///
/// ```
/// use tracker_domain::FieldUpdate;
///
/// let description_update = FieldUpdate::Set("Entry point".to_string());
/// let cleared: FieldUpdate<String> = FieldUpdate::Clear;
/// let untouched: FieldUpdate<String> = FieldUpdate::NoChange;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Do not modify this field (keep existing value)
    NoChange,
    /// Set the field to the provided value
    Set(T),
    /// Clear the field (reset to its default)
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::NoChange
    }
}

impl<T: Default> FieldUpdate<T> {
    /// Apply this update to a field
    ///
    /// # Example
    ///
    /// ```
    /// use tracker_domain::FieldUpdate;
    ///
    /// let mut field = "old value".to_string();
    /// FieldUpdate::Set("new value".to_string()).apply_to(&mut field);
    /// assert_eq!(field, "new value");
    ///
    /// FieldUpdate::Clear.apply_to(&mut field);
    /// assert_eq!(field, "");
    /// ```
    pub fn apply_to(self, field: &mut T) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = value,
            FieldUpdate::Clear => *field = T::default(),
        }
    }
}

impl<T> FieldUpdate<T> {
    /// Check if this represents a change (not NoChange)
    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// Convert Option<T> to FieldUpdate<T>
    /// - Some(value) becomes Set(value)
    /// - None becomes Clear
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}
