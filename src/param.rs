use crate::binding::CompleterBinding;
use crate::error::ParseError;
use crate::parsed_args::ParsedArgs;

/// Declaration of a single positional command parameter
#[derive(Clone, Debug)]
pub struct ParamSpec {
    /// Parameter name (for usage/help output)
    pub name: &'static str,

    /// Help text describing the parameter
    pub help: &'static str,

    /// Whether the parameter must be supplied
    pub required: bool,

    /// Completer to use when completing this parameter
    pub completion: Option<CompleterBinding>,
}

impl ParamSpec {
    /// Create a required parameter with no completion
    pub fn new(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            required: true,
            completion: None,
        }
    }

    /// Mark the parameter as optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Attach the completer this parameter is completed with
    pub fn completed_by(mut self, binding: CompleterBinding) -> Self {
        self.completion = Some(binding);
        self
    }
}

/// Declaration of a command and its ordered positional parameters
#[derive(Clone, Debug)]
pub struct CommandSpec {
    /// Command name (without leading slash)
    pub name: &'static str,

    /// Help text describing the command
    pub help: &'static str,

    /// Positional parameters in declaration order
    pub params: Vec<ParamSpec>,
}

impl CommandSpec {
    /// Create a command declaration with no parameters
    pub fn new(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            params: Vec::new(),
        }
    }

    /// Append a positional parameter
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// The completer binding attached to the parameter at `index`, if any
    pub fn completion_for(&self, index: usize) -> Option<&CompleterBinding> {
        self.params.get(index).and_then(|p| p.completion.as_ref())
    }

    /// Validate parsed arguments against the declared parameters.
    ///
    /// Fails with `MissingArg` for an absent required parameter, and with
    /// `Unused` when tokens remain past the declared arity.
    pub fn bind(&self, args: &ParsedArgs) -> Result<(), ParseError> {
        for (index, param) in self.params.iter().enumerate() {
            if param.required && args.get(index).is_none() {
                return Err(ParseError::MissingArg(index));
            }
        }

        args.expect_consumed(self.params.len())
    }
}
