//! Writes small ONNX graphs for tests.
//!
//! Only the handful of protobuf fields these graphs need are encoded: a model
//! with one opset import, and a graph of `Cast`, `ReduceMean` and `Div` nodes.

use std::io::Write;

use tempfile::NamedTempFile;

// TensorProto.DataType
pub const FLOAT: i64 = 1;
pub const INT32: i64 = 6;
pub const INT64: i64 = 7;
pub const DOUBLE: i64 = 11;

const IR_VERSION: i64 = 7;
const OPSET_VERSION: i64 = 13;

// AttributeProto.AttributeType
const ATTRIBUTE_INT: i64 = 2;
const ATTRIBUTE_INTS: i64 = 7;

const WIRE_VARINT: u32 = 0;
const WIRE_LEN: u32 = 2;

/// One dimension of the model input.
#[derive(Debug, Clone, Copy)]
pub enum Dim {
    /// Symbolic batch dimension, reported by the runtime as -1
    Batch,
    Fixed(i64),
}

#[derive(Default)]
struct Message(Vec<u8>);

impl Message {
    fn key(&mut self, field: u32, wire_type: u32) {
        put_varint(&mut self.0, u64::from((field << 3) | wire_type));
    }

    fn int(&mut self, field: u32, value: i64) -> &mut Self {
        self.key(field, WIRE_VARINT);
        put_varint(&mut self.0, value as u64);
        self
    }

    fn bytes(&mut self, field: u32, value: &[u8]) -> &mut Self {
        self.key(field, WIRE_LEN);
        put_varint(&mut self.0, value.len() as u64);
        self.0.extend_from_slice(value);
        self
    }

    fn string(&mut self, field: u32, value: &str) -> &mut Self {
        self.bytes(field, value.as_bytes())
    }

    fn message(&mut self, field: u32, value: &Message) -> &mut Self {
        self.bytes(field, &value.0)
    }
}

fn put_varint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// ValueInfoProto for a tensor; `dims: None` leaves the shape unspecified.
fn tensor_info(name: &str, elem_type: i64, dims: Option<&[Dim]>) -> Message {
    let mut tensor = Message::default();
    tensor.int(1, elem_type);
    if let Some(dims) = dims {
        let mut shape = Message::default();
        for dim in dims {
            let mut d = Message::default();
            match dim {
                Dim::Batch => d.string(2, "batch"),
                Dim::Fixed(n) => d.int(1, *n),
            };
            shape.message(1, &d);
        }
        tensor.message(2, &shape);
    }

    let mut ty = Message::default();
    ty.message(1, &tensor);
    let mut info = Message::default();
    info.string(1, name).message(2, &ty);
    info
}

fn node(op_type: &str, inputs: &[&str], output: &str, attributes: &[Message]) -> Message {
    let mut node = Message::default();
    for input in inputs {
        node.string(1, input);
    }
    node.string(2, output).string(3, output).string(4, op_type);
    for attribute in attributes {
        node.message(5, attribute);
    }
    node
}

fn int_attribute(name: &str, value: i64) -> Message {
    let mut attribute = Message::default();
    attribute.string(1, name).int(3, value).int(20, ATTRIBUTE_INT);
    attribute
}

fn ints_attribute(name: &str, values: &[i64]) -> Message {
    let mut attribute = Message::default();
    attribute.string(1, name);
    for value in values {
        attribute.int(8, *value);
    }
    attribute.int(20, ATTRIBUTE_INTS);
    attribute
}

/// A one-element float tensor stored as raw little-endian bytes.
fn float_initializer(name: &str, value: f32) -> Message {
    let mut tensor = Message::default();
    tensor
        .int(1, 1)
        .int(2, FLOAT)
        .string(8, name)
        .bytes(9, &value.to_le_bytes());
    tensor
}

fn encode_model(input_type: i64, input_dims: &[Dim], divide_by_zero: bool) -> Vec<u8> {
    let mean_output = if divide_by_zero { "mean" } else { "score" };

    let mut graph = Message::default();
    graph
        .message(
            1,
            &node("Cast", &["indices"], "as_float", &[int_attribute("to", FLOAT)]),
        )
        .message(
            1,
            &node(
                "ReduceMean",
                &["as_float"],
                mean_output,
                &[ints_attribute("axes", &[1]), int_attribute("keepdims", 1)],
            ),
        );
    if divide_by_zero {
        graph
            .message(1, &node("Div", &["mean", "zero"], "score", &[]))
            .message(5, &float_initializer("zero", 0.0));
    }
    graph
        .string(2, "mean_index")
        .message(11, &tensor_info("indices", input_type, Some(input_dims)))
        .message(12, &tensor_info("score", FLOAT, None));

    let mut opset = Message::default();
    opset.int(2, OPSET_VERSION);

    let mut model = Message::default();
    model
        .int(1, IR_VERSION)
        .string(2, "fraudguard-tests")
        .message(7, &graph)
        .message(8, &opset);
    model.0
}

/// Scores a sequence as the mean of its indices: `[batch, 100] -> [batch, 1]`.
///
/// With the test vocabulary, `"hello world"` (indices 2 and 3) scores 0.05.
pub fn mean_index_model(input_type: i64, input_dims: &[Dim]) -> Vec<u8> {
    encode_model(input_type, input_dims, false)
}

/// Same graph as [`mean_index_model`] with the mean divided by zero, so every
/// output is infinite or NaN.
pub fn divide_by_zero_model() -> Vec<u8> {
    encode_model(INT64, &[Dim::Batch, Dim::Fixed(100)], true)
}

pub fn write_model(bytes: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".onnx")
        .tempfile()
        .expect("Failed to create model file");
    file.write_all(bytes).expect("Failed to write model file");
    file
}
