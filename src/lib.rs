pub mod configuration;

pub mod analysis {
    pub mod ruleresult;
    pub mod resultaggregator;
    pub mod convergenceanalyzer;
}

pub mod engine {
    pub mod engineerror;
    pub mod integrationrequest;
    pub mod calculationreport;
    pub mod integrationengine;
}

pub mod expression {
    pub mod compileerror;
    pub mod token;
    pub mod tokenizer;
    pub mod expressiontree;
    pub mod parser;
    pub mod compiler;
}

pub mod function {
    pub mod predefinedfunction;
    pub mod predefinedfunctionmanager;
    pub mod integrablefunction;
}

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod point2d;
    pub mod realfunction;
    pub mod round;
    pub mod derivativeestimator;
}

pub mod quadrature {
    pub mod ruleid;
    pub mod quadratureerror;
    pub mod uniformgrid;
    pub mod quadraturerule;
    pub mod trapezoidal;
    pub mod midpoint;
    pub mod simpsononethird;
    pub mod simpsonthreeeighths;
    pub mod montecarlo;
    pub mod ruleregistry;
}
