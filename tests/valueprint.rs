//! End-to-end rendering and marshalling against a small in-memory debuggee.
//!
//! The debuggee holds one `MyApp.Account` instance:
//!
//! ```text
//! class Account : System.Object {
//!     string      owner;
//!     decimal     balance;
//!     Permissions access;   // [Flags] enum : byte
//!     int[,]      grid;     // lower bounds 1, 0
//! }
//! ```
//!
//! Every field is reached through a reference, the way a debugger sees locals.

use std::{collections::HashMap, sync::Arc};

use dotvalue::{
    format::decimal::DecimalParts,
    metadata::attributes::FLAGS_ATTRIBUTE_CTOR,
    prelude::*,
};

const MODULE: u64 = 0x7f00_0000;

const OBJECT: Token = Token(0x0200_0001);
const VALUETYPE: Token = Token(0x0200_0002);
const ENUM: Token = Token(0x0200_0003);
const DECIMAL: Token = Token(0x0200_0004);
const ACCOUNT: Token = Token(0x0200_0010);
const PERMISSIONS: Token = Token(0x0200_0011);

const OWNER: Token = Token(0x0400_0001);
const BALANCE: Token = Token(0x0400_0002);
const ACCESS: Token = Token(0x0400_0003);
const GRID: Token = Token(0x0400_0004);
const DECIMAL_FLAGS: Token = Token(0x0400_0010);
const DECIMAL_HI: Token = Token(0x0400_0011);
const DECIMAL_LO64: Token = Token(0x0400_0012);

struct TypeRow {
    name: &'static str,
    base: Option<Token>,
    fields: Vec<FieldInfo>,
    attributes: Vec<CustomAttributeInfo>,
}

struct Module {
    types: HashMap<Token, TypeRow>,
}

impl Module {
    fn new() -> Self {
        let mut types = HashMap::new();
        let mut add = |token, name, base, fields, attributes| {
            types.insert(
                token,
                TypeRow {
                    name,
                    base,
                    fields,
                    attributes,
                },
            );
        };

        add(OBJECT, "System.Object", None, vec![], vec![]);
        add(VALUETYPE, "System.ValueType", Some(OBJECT), vec![], vec![]);
        add(ENUM, "System.Enum", Some(VALUETYPE), vec![], vec![]);
        add(
            DECIMAL,
            "decimal",
            Some(VALUETYPE),
            vec![
                FieldInfo::instance(DECIMAL_FLAGS, "_flags", ELEMENT_TYPE::I4),
                FieldInfo::instance(DECIMAL_HI, "_hi32", ELEMENT_TYPE::U4),
                FieldInfo::instance(DECIMAL_LO64, "_lo64", ELEMENT_TYPE::U8),
            ],
            vec![],
        );
        add(
            ACCOUNT,
            "MyApp.Account",
            Some(OBJECT),
            vec![
                FieldInfo::instance(OWNER, "owner", ELEMENT_TYPE::STRING),
                FieldInfo::instance(BALANCE, "balance", ELEMENT_TYPE::VALUETYPE),
                FieldInfo::instance(ACCESS, "access", ELEMENT_TYPE::VALUETYPE),
                FieldInfo::instance(GRID, "grid", ELEMENT_TYPE::ARRAY),
            ],
            vec![],
        );
        add(
            PERMISSIONS,
            "MyApp.Permissions",
            Some(ENUM),
            vec![
                FieldInfo::instance(Token(0x0400_0020), "value__", ELEMENT_TYPE::U1),
                FieldInfo::literal(Token(0x0400_0021), "None", ELEMENT_TYPE::U1, &[0]),
                FieldInfo::literal(Token(0x0400_0022), "Read", ELEMENT_TYPE::U1, &[1]),
                FieldInfo::literal(Token(0x0400_0023), "Write", ELEMENT_TYPE::U1, &[2]),
                FieldInfo::literal(Token(0x0400_0024), "Execute", ELEMENT_TYPE::U1, &[4]),
            ],
            vec![CustomAttributeInfo::new(
                Token(0x0C00_0001),
                FLAGS_ATTRIBUTE_CTOR,
            )],
        );

        Module { types }
    }

    fn descriptor(token: Token, element_type: u8) -> TypeDescriptor {
        TypeDescriptor::new(MODULE, token, element_type)
    }

    fn row(&self, ty: &TypeDescriptor) -> Result<&TypeRow> {
        self.types
            .get(&ty.token)
            .ok_or_else(|| Error::MetadataUnavailable(format!("unknown type {}", ty.token)))
    }
}

impl MetadataProvider for Module {
    fn base_type(&self, ty: &TypeDescriptor) -> Result<Option<TypeDescriptor>> {
        Ok(self
            .row(ty)?
            .base
            .map(|base| Module::descriptor(base, ELEMENT_TYPE::CLASS)))
    }

    fn fields(&self, ty: &TypeDescriptor) -> Result<Vec<FieldInfo>> {
        Ok(self.row(ty)?.fields.clone())
    }

    fn custom_attributes(&self, ty: &TypeDescriptor) -> Result<Vec<CustomAttributeInfo>> {
        Ok(self.row(ty)?.attributes.clone())
    }
}

impl TypeNamer for Module {
    fn type_name(&self, ty: &TypeDescriptor) -> Result<String> {
        if ty.token.is_nil() {
            return match ty.element_type {
                ELEMENT_TYPE::I4 => Ok("int".to_string()),
                ELEMENT_TYPE::STRING => Ok("string".to_string()),
                other => Err(Error::MetadataUnavailable(format!("no name for 0x{other:x}"))),
            };
        }
        Ok(self.row(ty)?.name.to_string())
    }
}

#[derive(Debug)]
enum Value {
    Scalar {
        element_type: u8,
        ty: TypeDescriptor,
        raw: Vec<u8>,
    },
    Str(Vec<u16>),
    Reference(Option<ValueRef>),
    Boxed(ValueRef),
    Array {
        dimensions: Vec<u32>,
        bases: Vec<u32>,
    },
    Object {
        ty: TypeDescriptor,
        raw: Vec<u8>,
        fields: HashMap<Token, ValueRef>,
    },
}

impl Value {
    fn scalar(element_type: u8, raw: &[u8]) -> ValueRef {
        Arc::new(Value::Scalar {
            element_type,
            ty: TypeDescriptor::primitive(element_type),
            raw: raw.to_vec(),
        })
    }

    fn string(text: &str) -> ValueRef {
        Arc::new(Value::Str(text.encode_utf16().collect()))
    }

    fn reference(target: ValueRef) -> ValueRef {
        Arc::new(Value::Reference(Some(target)))
    }
}

impl CorValue for Value {
    fn element_type(&self) -> Result<u8> {
        Ok(match self {
            Value::Scalar { element_type, .. } => *element_type,
            Value::Str(_) => ELEMENT_TYPE::STRING,
            Value::Reference(_) | Value::Boxed(_) => ELEMENT_TYPE::CLASS,
            Value::Array { .. } => ELEMENT_TYPE::ARRAY,
            Value::Object { ty, .. } => ty.element_type,
        })
    }

    fn size(&self) -> Result<u32> {
        Ok(match self {
            Value::Scalar { raw, .. } | Value::Object { raw, .. } => raw.len() as u32,
            _ => 8,
        })
    }

    fn exact_type(&self) -> Result<TypeDescriptor> {
        match self {
            Value::Scalar { ty, .. } | Value::Object { ty, .. } => Ok(ty.clone()),
            Value::Str(_) => Ok(TypeDescriptor::primitive(ELEMENT_TYPE::STRING)),
            Value::Boxed(inner) => inner.exact_type(),
            Value::Reference(Some(target)) => target.exact_type(),
            _ => Err(Error::MetadataUnavailable("no exact type".to_string())),
        }
    }

    fn as_reference(&self) -> Option<&dyn ReferenceValue> {
        matches!(self, Value::Reference(_)).then_some(self as &dyn ReferenceValue)
    }

    fn as_boxed(&self) -> Option<&dyn BoxValue> {
        matches!(self, Value::Boxed(_)).then_some(self as &dyn BoxValue)
    }

    fn as_generic(&self) -> Option<&dyn GenericValue> {
        matches!(self, Value::Scalar { .. } | Value::Object { .. })
            .then_some(self as &dyn GenericValue)
    }

    fn as_string(&self) -> Option<&dyn StringValue> {
        matches!(self, Value::Str(_)).then_some(self as &dyn StringValue)
    }

    fn as_array(&self) -> Option<&dyn ArrayValue> {
        matches!(self, Value::Array { .. }).then_some(self as &dyn ArrayValue)
    }

    fn as_object(&self) -> Option<&dyn ObjectValue> {
        matches!(self, Value::Object { .. }).then_some(self as &dyn ObjectValue)
    }
}

impl ReferenceValue for Value {
    fn is_null(&self) -> Result<bool> {
        Ok(matches!(self, Value::Reference(None)))
    }

    fn dereference(&self) -> Result<ValueRef> {
        match self {
            Value::Reference(Some(target)) => Ok(Arc::clone(target)),
            _ => Err(Error::Target("null dereference".to_string())),
        }
    }

    fn address(&self) -> Result<u64> {
        Ok(0x1000)
    }
}

impl BoxValue for Value {
    fn object(&self) -> Result<ValueRef> {
        match self {
            Value::Boxed(inner) => Ok(Arc::clone(inner)),
            _ => Err(Error::Target("not a box".to_string())),
        }
    }
}

impl GenericValue for Value {
    fn raw(&self) -> Result<Vec<u8>> {
        match self {
            Value::Scalar { raw, .. } | Value::Object { raw, .. } => Ok(raw.clone()),
            _ => Err(Error::Target("no contents".to_string())),
        }
    }
}

impl StringValue for Value {
    fn length(&self) -> Result<u32> {
        match self {
            Value::Str(units) => Ok(units.len() as u32),
            _ => Err(Error::Target("not a string".to_string())),
        }
    }

    fn read(&self, buffer: &mut [u16]) -> Result<u32> {
        let Value::Str(units) = self else {
            return Err(Error::Target("not a string".to_string()));
        };
        let count = units.len().min(buffer.len());
        buffer[..count].copy_from_slice(&units[..count]);
        if count < buffer.len() {
            buffer[count] = 0;
        }
        Ok(count as u32)
    }
}

impl ArrayValue for Value {
    fn rank(&self) -> Result<u32> {
        self.dimensions().map(|dimensions| dimensions.len() as u32)
    }

    fn count(&self) -> Result<u32> {
        self.dimensions().map(|dimensions| dimensions.iter().product())
    }

    fn dimensions(&self) -> Result<Vec<u32>> {
        match self {
            Value::Array { dimensions, .. } => Ok(dimensions.clone()),
            _ => Err(Error::Target("not an array".to_string())),
        }
    }

    fn has_base_indices(&self) -> Result<bool> {
        match self {
            Value::Array { bases, .. } => Ok(bases.iter().any(|base| *base != 0)),
            _ => Err(Error::Target("not an array".to_string())),
        }
    }

    fn base_indices(&self) -> Result<Vec<u32>> {
        match self {
            Value::Array { bases, .. } => Ok(bases.clone()),
            _ => Err(Error::Target("not an array".to_string())),
        }
    }

    fn element_type_descriptor(&self) -> Result<TypeDescriptor> {
        Ok(TypeDescriptor::primitive(ELEMENT_TYPE::I4))
    }
}

impl ObjectValue for Value {
    fn field_value(&self, _owner: &TypeDescriptor, field: Token) -> Result<ValueRef> {
        match self {
            Value::Object { fields, .. } => fields
                .get(&field)
                .cloned()
                .ok_or_else(|| Error::Target(format!("field {field} not present"))),
            _ => Err(Error::Target("not an object".to_string())),
        }
    }
}

fn decimal(parts: DecimalParts) -> ValueRef {
    let lo64 = (u64::from(parts.mid) << 32) | u64::from(parts.lo);
    let fields = HashMap::from([
        (
            DECIMAL_FLAGS,
            Value::scalar(ELEMENT_TYPE::I4, &parts.flags.to_le_bytes()),
        ),
        (
            DECIMAL_HI,
            Value::scalar(ELEMENT_TYPE::U4, &parts.hi.to_le_bytes()),
        ),
        (
            DECIMAL_LO64,
            Value::scalar(ELEMENT_TYPE::U8, &lo64.to_le_bytes()),
        ),
    ]);

    Arc::new(Value::Object {
        ty: Module::descriptor(DECIMAL, ELEMENT_TYPE::VALUETYPE),
        raw: parts.to_raw().to_vec(),
        fields,
    })
}

fn account(balance: DecimalParts, access: u8) -> ValueRef {
    let permissions = Arc::new(Value::Object {
        ty: Module::descriptor(PERMISSIONS, ELEMENT_TYPE::VALUETYPE),
        raw: vec![access],
        fields: HashMap::new(),
    });
    let grid = Arc::new(Value::Array {
        dimensions: vec![3, 4],
        bases: vec![1, 0],
    });

    let fields = HashMap::from([
        (
            OWNER,
            Value::reference(Value::string("Grace \"Amazing\" Hopper\n")),
        ),
        (BALANCE, decimal(balance)),
        (ACCESS, Arc::new(Value::Boxed(permissions)) as ValueRef),
        (GRID, Value::reference(grid)),
    ]);

    Value::reference(Arc::new(Value::Object {
        ty: Module::descriptor(ACCOUNT, ELEMENT_TYPE::CLASS),
        raw: vec![0; 8],
        fields,
    }))
}

#[test]
fn render_account_fields() {
    let module = Module::new();
    let printer = ValuePrinter::new(&module, &module);
    // -79228162514264337593543950.335
    let balance = DecimalParts::new(u32::MAX, u32::MAX, u32::MAX, (3 << 16) | (1 << 31));
    let value = account(balance, 0b101);

    assert_eq!(
        printer.format_named_field(&value, "owner", None).unwrap(),
        "\"Grace \\\"Amazing\\\" Hopper\\n\""
    );
    assert_eq!(
        printer.format_named_field(&value, "balance", None).unwrap(),
        "-79228162514264337593543950.335"
    );
    assert_eq!(
        printer.format_named_field(&value, "access", None).unwrap(),
        "Read | Execute"
    );
    assert_eq!(
        printer.format_named_field(&value, "grid", None).unwrap(),
        "{int[1..3, 4]}"
    );
    assert_eq!(
        printer.format_value(&value, true).unwrap(),
        "{MyApp.Account}"
    );
    assert!(matches!(
        printer.format_named_field(&value, "password", None),
        Err(Error::FieldNotFound(_))
    ));
}

#[test]
fn enum_rendering_modes() {
    let module = Module::new();
    let printer = ValuePrinter::new(&module, &module);

    let exact = account(DecimalParts::default(), 0);
    assert_eq!(
        printer.format_named_field(&exact, "access", None).unwrap(),
        "None"
    );

    let unexplained = account(DecimalParts::default(), 0b1001);
    assert_eq!(
        printer.format_named_field(&unexplained, "access", None).unwrap(),
        "9"
    );

    let options = PrintOptions {
        flags_separator: ", ".to_string(),
        ..PrintOptions::default()
    };
    let printer = ValuePrinter::with_options(&module, &module, options);
    let all = account(DecimalParts::default(), 0b111);
    assert_eq!(
        printer.format_named_field(&all, "access", None).unwrap(),
        "Read, Write, Execute"
    );
}

#[test]
fn marshal_and_render_on_the_other_side() {
    let module = Module::new();
    let printer = ValuePrinter::new(&module, &module);
    let balance = DecimalParts::new(0, 0, 12_345, 2 << 16);

    let marshalled = printer.marshal(&decimal(balance), &HeapAllocator).unwrap();
    assert_eq!(marshalled.ty, MarshalType::Decimal);

    // Only the tag id and the bytes cross the boundary
    let id = marshalled.ty.id();
    let bytes = marshalled.payload.bytes().to_vec();
    drop(marshalled);

    let ty = MarshalType::try_from(id).unwrap();
    let (name, text) = format_marshalled(ty, &bytes).unwrap();
    assert_eq!((name.as_str(), text.as_str()), ("decimal", "123.45"));

    let text = Value::reference(Value::string("tab\there"));
    let marshalled = printer.marshal(&text, &HeapAllocator).unwrap();
    let (name, text) = format_marshalled(marshalled.ty, marshalled.payload.bytes()).unwrap();
    assert_eq!((name.as_str(), text.as_str()), ("string", "\"tab\\there\""));

    let number = Value::scalar(ELEMENT_TYPE::I8, &(-7i64).to_le_bytes());
    let marshalled = printer.marshal(&number, &HeapAllocator).unwrap();
    assert_eq!(
        printer.format_payload(&marshalled).unwrap(),
        ("long".to_string(), "-7".to_string())
    );
}

#[test]
fn composite_handles_stay_retained() {
    let module = Module::new();
    let printer = ValuePrinter::new(&module, &module);
    let value = account(DecimalParts::default(), 1);

    let marshalled = printer.marshal(&value, &HeapAllocator).unwrap();
    assert_eq!(marshalled.ty, MarshalType::CorValue);
    assert_eq!(Arc::strong_count(&value), 2);
    assert_eq!(
        printer.format_payload(&marshalled).unwrap(),
        ("MyApp.Account".to_string(), "{MyApp.Account}".to_string())
    );

    drop(marshalled);
    assert_eq!(Arc::strong_count(&value), 1);
}

#[test]
fn null_references() {
    let module = Module::new();
    let printer = ValuePrinter::new(&module, &module);
    let null: ValueRef = Arc::new(Value::Reference(None));

    assert_eq!(printer.format_value(&null, true).unwrap(), "null");
    let marshalled = printer.marshal(&null, &HeapAllocator).unwrap();
    assert_eq!(marshalled.ty, MarshalType::Object);
    assert_eq!(
        format_marshalled(marshalled.ty, marshalled.payload.bytes()).unwrap(),
        ("object".to_string(), "null".to_string())
    );
}
