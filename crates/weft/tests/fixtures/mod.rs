use std::any::TypeId;

use weft::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub label: Option<String>,
}

static POINT: Descriptor = Descriptor::composite("Point").with_elements(&["x", "y", "label"]);

#[derive(Debug)]
pub struct PointConverter;

impl Converter for PointConverter {
    type Value = Point;

    fn descriptor(&self) -> &Descriptor {
        &POINT
    }

    fn encode(&self, value: &Point, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
        let int = ScalarConverter::<i32>::new();
        let label = Nullable::new(ScalarConverter::<String>::new());
        let mut object = encoder.object(&POINT);
        object
            .field("x", &int, &value.x)?
            .field_with_default("y", &int, &value.y, &0)?
            .field_with_default("label", &label, &value.label, &None)?;
        Ok(object.finish())
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<Point, WeftError> {
        let int = ScalarConverter::<i32>::new();
        let label = Nullable::new(ScalarConverter::<String>::new());
        let object = decoder.object(element, &POINT)?;
        Ok(Point {
            x: object.required("x", &int)?,
            y: object.optional("y", &int, || 0)?,
            label: object.optional("label", &label, || None)?,
        })
    }
}

/// A record without fields.
#[derive(Debug, PartialEq, Eq)]
pub struct Empty;

static EMPTY: Descriptor = Descriptor::composite("Empty");

#[derive(Debug)]
pub struct EmptyConverter;

impl Converter for EmptyConverter {
    type Value = Empty;

    fn descriptor(&self) -> &Descriptor {
        &EMPTY
    }

    fn encode(&self, _: &Empty, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
        Ok(encoder.object(&EMPTY).finish())
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<Empty, WeftError> {
        decoder.object(element, &EMPTY)?;
        Ok(Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Color {
    Red,
    Green,
}

pub fn colors() -> EnumConverter<Color> {
    EnumConverter::new("Color").variant("red", Color::Red).variant("green", Color::Green)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub width: u8,
}

static PEN: Descriptor = Descriptor::composite("Pen").with_elements(&["color", "width"]);

#[derive(Debug)]
pub struct PenConverter;

impl Converter for PenConverter {
    type Value = Pen;

    fn descriptor(&self) -> &Descriptor {
        &PEN
    }

    fn encode(&self, value: &Pen, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
        let mut object = encoder.object(&PEN);
        object
            .field("color", &colors(), &value.color)?
            .field("width", &ScalarConverter::<u8>::new(), &value.width)?;
        Ok(object.finish())
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<Pen, WeftError> {
        let object = decoder.object(element, &PEN)?;
        Ok(Pen {
            color: object.optional("color", &colors(), || Color::Red)?,
            width: object.optional("width", &ScalarConverter::<u8>::new(), || 1)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    pub side: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Square(Square),
}

impl Polymorphic for Shape {
    fn runtime_type(&self) -> TypeId {
        match self {
            Self::Circle(_) => TypeId::of::<Circle>(),
            Self::Square(_) => TypeId::of::<Square>(),
        }
    }
}

static CIRCLE: Descriptor = Descriptor::composite("circle").with_elements(&["radius"]);
static SQUARE: Descriptor = Descriptor::composite("square").with_elements(&["side"]);

#[derive(Debug)]
pub struct CircleConverter;

impl Converter for CircleConverter {
    type Value = Circle;

    fn descriptor(&self) -> &Descriptor {
        &CIRCLE
    }

    fn encode(&self, value: &Circle, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
        let mut object = encoder.object(&CIRCLE);
        object.field("radius", &ScalarConverter::<f64>::new(), &value.radius)?;
        Ok(object.finish())
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<Circle, WeftError> {
        let object = decoder.object(element, &CIRCLE)?;
        Ok(Circle { radius: object.required("radius", &ScalarConverter::<f64>::new())? })
    }
}

#[derive(Debug)]
pub struct SquareConverter;

impl Converter for SquareConverter {
    type Value = Square;

    fn descriptor(&self) -> &Descriptor {
        &SQUARE
    }

    fn encode(&self, value: &Square, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
        let mut object = encoder.object(&SQUARE);
        object.field("side", &ScalarConverter::<f64>::new(), &value.side)?;
        Ok(object.finish())
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<Square, WeftError> {
        let object = decoder.object(element, &SQUARE)?;
        Ok(Square { side: object.required("side", &ScalarConverter::<f64>::new())? })
    }
}

const fn as_circle(shape: &Shape) -> Option<&Circle> {
    match shape {
        Shape::Circle(circle) => Some(circle),
        Shape::Square(_) => None,
    }
}

const fn as_square(shape: &Shape) -> Option<&Square> {
    match shape {
        Shape::Square(square) => Some(square),
        Shape::Circle(_) => None,
    }
}

/// `Shape` tagged `circle` / `square`.
pub fn shapes() -> PolymorphicConverter<Shape> {
    PolymorphicConverter::builder("Shape")
        .subtype(CircleConverter, Shape::Circle, as_circle)
        .subtype(SquareConverter, Shape::Square, as_square)
        .build()
}

/// `Shape` with both subtypes tagged `blob`.
pub fn colliding_shapes() -> PolymorphicConverter<Shape> {
    PolymorphicConverter::builder("Shape")
        .tagged_subtype("blob", CircleConverter, Shape::Circle, as_circle)
        .tagged_subtype("blob", SquareConverter, Shape::Square, as_square)
        .build()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cat {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Animal {
    Cat(Cat),
}

impl Polymorphic for Animal {
    fn runtime_type(&self) -> TypeId {
        match self {
            Self::Cat(_) => TypeId::of::<Cat>(),
        }
    }
}

static CAT: Descriptor = Descriptor::composite("cat").with_elements(&["name"]);

#[derive(Debug)]
pub struct CatConverter;

impl Converter for CatConverter {
    type Value = Cat;

    fn descriptor(&self) -> &Descriptor {
        &CAT
    }

    fn encode(&self, value: &Cat, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
        let mut object = encoder.object(&CAT);
        object.field("name", &ScalarConverter::<String>::new(), &value.name)?;
        Ok(object.finish())
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<Cat, WeftError> {
        let object = decoder.object(element, &CAT)?;
        Ok(Cat { name: object.required("name", &ScalarConverter::<String>::new())? })
    }
}

/// `Animal` whose only subtype reuses the `circle` tag of [`shapes`].
pub fn animals() -> PolymorphicConverter<Animal> {
    PolymorphicConverter::builder("Animal")
        .tagged_subtype("circle", CatConverter, Animal::Cat, |animal| match animal {
            Animal::Cat(cat) => Some(cat),
        })
        .build()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Token(Token),
}

impl Polymorphic for Node {
    fn runtime_type(&self) -> TypeId {
        match self {
            Self::Token(_) => TypeId::of::<Token>(),
        }
    }
}

static TOKEN: Descriptor = Descriptor::composite("token").with_elements(&["type"]);

/// Declares a field named `type`, clashing with the default class discriminator.
#[derive(Debug)]
pub struct TokenConverter;

impl Converter for TokenConverter {
    type Value = Token;

    fn descriptor(&self) -> &Descriptor {
        &TOKEN
    }

    fn encode(&self, value: &Token, encoder: &Encoder<'_>) -> Result<Element, WeftError> {
        let mut object = encoder.object(&TOKEN);
        object.field("type", &ScalarConverter::<String>::new(), &value.kind)?;
        Ok(object.finish())
    }

    fn decode(&self, element: &Element, decoder: &Decoder<'_>) -> Result<Token, WeftError> {
        let object = decoder.object(element, &TOKEN)?;
        Ok(Token { kind: object.required("type", &ScalarConverter::<String>::new())? })
    }
}

pub fn nodes() -> PolymorphicConverter<Node> {
    PolymorphicConverter::builder("Node")
        .subtype(TokenConverter, Node::Token, |node| match node {
            Node::Token(token) => Some(token),
        })
        .build()
}
