//! Rendering of a single named field, searched along the base-type chain.

use tracing::trace;

use crate::{
    format::ValuePrinter,
    metadata::provider::{TypeDescriptor, SYSTEM_ENUM, SYSTEM_OBJECT, SYSTEM_VALUETYPE},
    value::{resolve, ValueRef},
    Error, Result,
};

impl ValuePrinter<'_> {
    /// Renders the field `name` of the object behind `value`.
    ///
    /// The search starts at `ty` (or the exact type of `value`) and walks up the base types
    /// until a type declares a field of that name; if a type declares several, the first in
    /// declaration order is used. The field value renders like
    /// [`ValuePrinter::format_value`] with escaping enabled. The walk stops without a result
    /// at `System.Object`, `System.ValueType` and `System.Enum`.
    ///
    /// # Errors
    /// - [`Error::FieldNotFound`] if no type in the chain declares the field
    /// - [`Error::UnsupportedShape`] if the chain reaches `System.Enum` or the value has no fields
    /// - [`Error::NullValue`] if `value` is a null reference
    /// - any metadata or target error raised along the way
    pub fn format_named_field(
        &self,
        value: &ValueRef,
        name: &str,
        ty: Option<&TypeDescriptor>,
    ) -> Result<String> {
        let mut current = match ty {
            Some(ty) => ty.clone(),
            None => value.exact_type()?,
        };

        for level in 0..=self.options.max_indirection_depth {
            let fields = self.metadata.fields_named(&current, name)?;
            trace!(level, token = %current.token, matches = fields.len(), "field lookup");

            if let Some(field) = fields.first() {
                let resolved = resolve(value, self.options.max_indirection_depth)?;
                if resolved.is_null {
                    return Err(Error::NullValue);
                }

                let object = resolved.value.as_object().ok_or_else(|| {
                    Error::UnsupportedShape(format!("value has no field '{name}'"))
                })?;
                let field_value = object.field_value(&current, field.token)?;
                return self.format_value(&field_value, true);
            }

            let Some(base) = self.metadata.base_type(&current)? else {
                return Err(Error::FieldNotFound(name.to_string()));
            };

            let base_name = self.namer.type_name(&base)?;
            if base_name == SYSTEM_ENUM {
                return Err(Error::UnsupportedShape(format!(
                    "field '{name}' requested on an enum"
                )));
            }
            if base_name == SYSTEM_OBJECT || base_name == SYSTEM_VALUETYPE {
                return Err(Error::FieldNotFound(name.to_string()));
            }

            current = base;
        }

        Err(Error::IndirectionLimit(self.options.max_indirection_depth))
    }
}
