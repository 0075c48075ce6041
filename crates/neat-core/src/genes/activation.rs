/// A neuron's role in the network. Ordinal values matter for downstream
/// phenotype builders that switch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NeuronType {
    None = 0,
    Input,
    Bias,
    Hidden,
    Output,
}

/// Activation function a neuron applies. Ordinal values are part of the
/// stable contract with serialization/phenotype-builder collaborators, so
/// the discriminants must never be reordered - only appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ActivationFunction {
    SignedSigmoid = 0,
    UnsignedSigmoid,
    Tanh,
    TanhCubic,
    SignedStep,
    UnsignedStep,
    SignedGauss,
    UnsignedGauss,
    Abs,
    SignedSine,
    UnsignedSine,
    Linear,
    Relu,
    Softplus,
}

impl ActivationFunction {
    pub const ALL: [ActivationFunction; 14] = [
        ActivationFunction::SignedSigmoid,
        ActivationFunction::UnsignedSigmoid,
        ActivationFunction::Tanh,
        ActivationFunction::TanhCubic,
        ActivationFunction::SignedStep,
        ActivationFunction::UnsignedStep,
        ActivationFunction::SignedGauss,
        ActivationFunction::UnsignedGauss,
        ActivationFunction::Abs,
        ActivationFunction::SignedSine,
        ActivationFunction::UnsignedSine,
        ActivationFunction::Linear,
        ActivationFunction::Relu,
        ActivationFunction::Softplus,
    ];
}
