//! Common Modelica sources for tests.

/// The minimal model used by the end-to-end editing scenario
pub const FOO_MODEL: &str = "model Foo
  Real x;
equation
end Foo;
";

/// Two top-level models, each with its own connections
pub const TWO_MODELS: &str = "model A
  Pin p;
  Pin n;
equation
  connect(p, n);
end A;

model B
  Pin a;
  Pin b;
  Pin c;
equation
  connect(a, b);
  connect(b, c);
end B;
";

/// A realistic circuit with modifications, annotations and an initial section
pub const CIRCUIT: &str = r#"within Examples;
model Circuit "Simple RC circuit"
  import SI = Modelica.SIunits;
  parameter SI.Resistance R = 100 "Resistance";
  parameter SI.Capacitance C = 1e-3;
  Modelica.Electrical.Analog.Sources.SineVoltage source(V = 220, f = 50)
    annotation(Placement(transformation(extent = {{-80, -10}, {-60, 10}})));
  Modelica.Electrical.Analog.Basic.Resistor resistor(R = R);
  Modelica.Electrical.Analog.Basic.Capacitor capacitor(C = C);
  Modelica.Electrical.Analog.Basic.Ground ground;
initial equation
  capacitor.v = 0;
equation
  connect(source.p, resistor.p) annotation(Line(points = {{-70, 10}, {-40, 10}}, color = {0, 0, 255}));
  connect(resistor.n, capacitor.p);
  connect(capacitor.n, ground.p);
  connect(source.n, ground.p);
  annotation(experiment(StopTime = 0.1));
end Circuit;
"#;

/// A package with nested models
pub const NESTED_PACKAGE: &str = "package Library
  model Inner
    Real v;
  equation
    connect(v, w);
  end Inner;

  model Other
    Real w;
  end Other;
end Library;
";

/// A model whose only equation section is `initial equation`
pub const INITIAL_ONLY: &str = "model Init
  Real x;
  Real y;
initial equation
  x = 0;
end Init;
";

/// A model without any equation section
pub const NO_EQUATIONS: &str = "model Plain
  Real x;
end Plain;
";

/// A model with no components, only a description string
pub const EMPTY_BODY: &str = "model Empty \"nothing yet\"
equation
end Empty;
";

/// Block comments in the header, after a declaration and inside a connect
pub const BLOCK_COMMENTS: &str = "/* Copyright header
 * spanning two lines */
model Commented /** documented **/
  Real x; /* a ** b */
  Pin p;
  Pin n;
equation
  connect(p /* plus */, n);
end Commented;
";
